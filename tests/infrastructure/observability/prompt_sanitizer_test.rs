use mediaforge::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_placeholder_is_returned() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_it_is_only_trimmed() {
    assert_eq!(sanitize_prompt("  A lighthouse at dawn "), "A lighthouse at dawn");
}

#[test]
fn given_long_prompt_when_sanitizing_then_it_is_truncated_with_total() {
    let prompt = "a".repeat(250);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (250 chars total)"));
}

#[test]
fn given_multibyte_text_when_truncating_then_char_boundaries_are_respected() {
    let prompt = "é".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"é".repeat(100)));
    assert!(sanitized.contains("(150 chars total)"));
}

#[test]
fn given_credentials_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("call ?key=AIzaSecret&alt=sse with Bearer abc.def token=xyz");

    assert!(!sanitized.contains("AIzaSecret"));
    assert!(!sanitized.contains("abc.def"));
    assert!(!sanitized.contains("xyz"));
    assert!(sanitized.contains("key=[REDACTED]&alt=sse"));
    assert!(sanitized.contains("Bearer [REDACTED]"));
}

#[test]
fn given_repeated_secret_marker_when_sanitizing_then_every_occurrence_is_redacted() {
    let sanitized = sanitize_prompt("secret=one and secret=two");

    assert_eq!(sanitized, "secret=[REDACTED] and secret=[REDACTED]");
}
