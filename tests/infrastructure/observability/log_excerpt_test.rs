use stock_analyzer::infrastructure::observability::log_excerpt;

#[test]
fn given_bearer_token_when_excerpting_then_token_is_redacted() {
    let excerpt = log_excerpt("Authorization: Bearer sk-live-123 rest");
    assert_eq!(excerpt, "Authorization: Bearer [REDACTED] rest");
}

#[test]
fn given_short_text_when_excerpting_then_kept_trimmed() {
    assert_eq!(log_excerpt("  Buy Acme.  "), "Buy Acme.");
}

#[test]
fn given_long_text_when_excerpting_then_truncated_with_length() {
    let text = "a".repeat(250);
    let excerpt = log_excerpt(&text);
    assert_eq!(excerpt, format!("{}... (250 chars total)", "a".repeat(100)));
}
