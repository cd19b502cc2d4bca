use super::*;

#[test]
fn root_dashboard_is_overview() {
    assert_eq!(section_title(None), "Overview");
    assert_eq!(section_title(Some("")), "Overview");
}

#[test]
fn known_sections_use_their_titles() {
    assert_eq!(section_title(Some("flows")), "Flows");
    assert_eq!(section_title(Some("/reports/")), "Reports");
    assert_eq!(section_title(Some("settings/billing")), "Settings");
}

#[test]
fn unknown_sections_keep_raw_name() {
    assert_eq!(section_title(Some("inbox")), "inbox");
}
