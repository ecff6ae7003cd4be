const MAX_VISIBLE_CHARS: usize = 100;

const SECRET_MARKERS: [&str; 5] = ["key=", "x-goog-api-key:", "Bearer ", "secret=", "token="];

/// Shortens prompt text for log lines and masks anything that looks like a
/// credential.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total)
    } else {
        trimmed.to_string()
    };

    SECRET_MARKERS
        .iter()
        .fold(visible, |text, marker| redact_after(&text, marker))
}

fn redact_after(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(marker) {
        let value_start = idx + marker.len();
        let value = rest[value_start..].trim_start();
        let skipped = rest[value_start..].len() - value.len();
        let value_len = value
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ','))
            .unwrap_or(value.len());

        out.push_str(&rest[..value_start]);
        out.push_str(&rest[value_start..value_start + skipped]);
        out.push_str("[REDACTED]");
        rest = &rest[value_start + skipped + value_len..];
    }

    out.push_str(rest);
    out
}
