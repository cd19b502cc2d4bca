use super::*;

const NOW: u64 = 1_700_000_000;

fn config() -> GoTrueConfig {
    GoTrueConfig::new("https://project.example.co/", "anon")
}

const TOKEN_BODY: &str = r#"{
    "access_token": "jwt-abc",
    "token_type": "bearer",
    "expires_in": 3600,
    "refresh_token": "r-123",
    "user": {
        "id": "6c1f",
        "email": "ada@example.com",
        "user_metadata": { "name": "Ada", "role": "Admin" },
        "confirmed_at": "2024-01-01T00:00:00Z"
    }
}"#;

#[test]
fn config_trims_trailing_slash() {
    assert_eq!(config().endpoint("/signup"), "https://project.example.co/auth/v1/signup");
}

#[test]
fn token_endpoint_carries_grant_type() {
    assert_eq!(
        token_endpoint(&config(), "password"),
        "https://project.example.co/auth/v1/token?grant_type=password"
    );
}

#[test]
fn recover_endpoint_encodes_redirect() {
    assert_eq!(
        recover_endpoint(&config(), "http://localhost:3000/reset-password"),
        "https://project.example.co/auth/v1/recover?redirect_to=http%3A%2F%2Flocalhost%3A3000%2Freset-password"
    );
}

#[test]
fn recover_endpoint_encodes_query_and_form_characters() {
    assert_eq!(
        recover_endpoint(&config(), "https://app.example.com/reset-password?a=b c&é"),
        "https://project.example.co/auth/v1/recover?redirect_to=https%3A%2F%2Fapp.example.com%2Freset-password%3Fa%3Db+c%26%C3%A9"
    );
}

#[test]
fn parse_session_computes_expiry_from_expires_in() {
    let session = parse_session(TOKEN_BODY, NOW).unwrap();
    assert_eq!(session.access_token, "jwt-abc");
    assert_eq!(session.refresh_token.as_deref(), Some("r-123"));
    assert_eq!(session.expires_at, Some(NOW + 3600));
    assert_eq!(session.user.user_metadata.role.as_deref(), Some("Admin"));
}

#[test]
fn parse_session_prefers_explicit_expires_at() {
    let body = r#"{"access_token":"t","expires_in":10,"expires_at":42,"user":{"id":"u"}}"#;
    assert_eq!(parse_session(body, NOW).unwrap().expires_at, Some(42));
}

#[test]
fn parse_session_rejects_garbage() {
    assert!(matches!(parse_session("{", NOW), Err(ProviderError::Malformed(_))));
}

#[test]
fn parse_sign_up_with_tokens_signs_in() {
    assert!(matches!(parse_sign_up(TOKEN_BODY, NOW), Ok(SignUpOutcome::SignedIn(_))));
}

#[test]
fn parse_sign_up_without_tokens_needs_confirmation() {
    let body = r#"{"id":"6c1f","email":"ada@example.com","confirmed_at":null,"user_metadata":{"name":"Ada"}}"#;
    match parse_sign_up(body, NOW).unwrap() {
        SignUpOutcome::ConfirmationRequired(user) => {
            assert_eq!(user.id, "6c1f");
            assert_eq!(user.confirmed_at, None);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn parse_sign_up_accepts_wrapped_user() {
    let body = r#"{"user":{"id":"6c1f","email":"ada@example.com"},"session":null}"#;
    assert!(matches!(parse_sign_up(body, NOW), Ok(SignUpOutcome::ConfirmationRequired(u)) if u.id == "6c1f"));
}

#[test]
fn parse_user_reads_provider_user() {
    let user = parse_user(r#"{"id":"u1","email":"a@b.com"}"#).unwrap();
    assert_eq!(user.email.as_deref(), Some("a@b.com"));
}

#[test]
fn rejection_prefers_service_wording() {
    let err = rejection(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#);
    assert_eq!(err, ProviderError::Rejected { status: Some(400), message: "Invalid login credentials".to_owned() });

    let err = rejection(422, r#"{"code":422,"msg":"User already registered"}"#);
    assert_eq!(err.user_message(), "User already registered");
}

#[test]
fn rejection_falls_back_to_status() {
    let err = rejection(502, "<html>bad gateway</html>");
    assert_eq!(err.user_message(), "request failed with status 502");
}

#[test]
fn expiry_uses_refresh_margin() {
    let mut session = parse_session(TOKEN_BODY, NOW).unwrap();
    assert!(!is_expired(&session, NOW));
    assert!(!is_expired(&session, NOW + 3600 - REFRESH_MARGIN_SECS - 1));
    assert!(is_expired(&session, NOW + 3600 - REFRESH_MARGIN_SECS));

    session.expires_at = None;
    assert!(!is_expired(&session, u64::MAX));
}

#[test]
fn refresh_delay_counts_down_to_the_margin() {
    let session = parse_session(TOKEN_BODY, NOW).unwrap();
    assert_eq!(refresh_delay_secs(&session, NOW), Some(3600 - REFRESH_MARGIN_SECS));
    assert_eq!(refresh_delay_secs(&session, NOW + 4000), Some(0));
}

#[test]
fn parse_fragment_reads_recovery_link() {
    let tokens = parse_fragment("#access_token=jwt&expires_in=3600&refresh_token=r1&token_type=bearer&type=recovery")
        .unwrap();
    assert_eq!(tokens.access_token, "jwt");
    assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));
    assert_eq!(tokens.expires_in, Some(3600));
    assert!(tokens.is_recovery());
}

#[test]
fn parse_fragment_decodes_values() {
    let tokens = parse_fragment("#access_token=abc&refresh_token=r%2Bt%3D&type=recovery").unwrap();
    assert_eq!(tokens.access_token, "abc");
    assert_eq!(tokens.refresh_token.as_deref(), Some("r+t="));
}

#[test]
fn parse_fragment_requires_access_token() {
    assert_eq!(parse_fragment("#type=recovery"), None);
    assert_eq!(parse_fragment(""), None);
    assert_eq!(parse_fragment("#access_token=&type=signup"), None);
}
