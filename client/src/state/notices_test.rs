use super::*;

fn notice(level: NoticeLevel, message: &str) -> Notice {
    Notice { level, message: message.to_owned() }
}

#[test]
fn push_assigns_increasing_ids() {
    let mut state = NoticeState::default();
    let a = state.push(&notice(NoticeLevel::Success, "Login successful!"));
    let b = state.push(&notice(NoticeLevel::Info, "You have been logged out."));
    assert!(b > a);
    assert_eq!(state.toasts.len(), 2);
}

#[test]
fn dismiss_removes_only_that_toast() {
    let mut state = NoticeState::default();
    let a = state.push(&notice(NoticeLevel::Success, "one"));
    state.push(&notice(NoticeLevel::Success, "two"));
    state.dismiss(a);
    assert_eq!(state.toasts.iter().map(|t| t.message.as_str()).collect::<Vec<_>>(), vec!["two"]);
}

#[test]
fn oldest_toast_drops_past_the_cap() {
    let mut state = NoticeState::default();
    for i in 0..6 {
        state.push(&notice(NoticeLevel::Info, &format!("n{i}")));
    }
    assert_eq!(state.toasts.len(), 4);
    assert_eq!(state.toasts[0].message, "n2");
}

#[test]
fn css_class_follows_level() {
    let mut state = NoticeState::default();
    state.push(&notice(NoticeLevel::Error, "Logout failed. Please try again."));
    assert_eq!(state.toasts[0].css_class(), "toast toast--error");
}
