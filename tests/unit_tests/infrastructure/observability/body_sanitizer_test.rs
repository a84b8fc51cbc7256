use docrelay::infrastructure::observability::sanitize_upstream_body;

#[test]
fn given_empty_body_when_sanitizing_then_returns_marker() {
    assert_eq!(sanitize_upstream_body("   "), "[EMPTY]");
}

#[test]
fn given_short_body_when_sanitizing_then_returns_unchanged() {
    let body = r#"[{"errorCode":"NOT_FOUND"}]"#;

    assert_eq!(sanitize_upstream_body(body), body);
}

#[test]
fn given_token_in_json_when_sanitizing_then_value_is_redacted() {
    let body = r#"{"access_token":"ya29.secret","token_type":"Bearer"}"#;

    let sanitized = sanitize_upstream_body(body);

    assert!(!sanitized.contains("ya29.secret"));
    assert!(sanitized.contains("[REDACTED]"));
}

#[test]
fn given_repeated_bearer_when_sanitizing_then_every_value_is_redacted() {
    let sanitized = sanitize_upstream_body("Bearer abc and Bearer def");

    assert_eq!(sanitized, "Bearer [REDACTED] and Bearer [REDACTED]");
}

#[test]
fn given_long_body_when_sanitizing_then_is_capped() {
    let body = "x".repeat(1000);

    let sanitized = sanitize_upstream_body(&body);

    assert!(sanitized.starts_with(&"x".repeat(300)));
    assert!(sanitized.ends_with("(1000 chars total)"));
}
