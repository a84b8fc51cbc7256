const MAX_VISIBLE_LENGTH: usize = 300;

/// Makes an upstream response body safe to log and to surface in job errors:
/// trims it, caps its length and masks credential-looking values.
pub fn sanitize_upstream_body(body: &str) -> String {
    let trimmed = body.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let capped = match trimmed.char_indices().nth(MAX_VISIBLE_LENGTH) {
        Some((cut, _)) => format!(
            "{}... ({} chars total)",
            &trimmed[..cut],
            trimmed.chars().count()
        ),
        None => trimmed.to_string(),
    };

    redact_sensitive_patterns(&capped)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        "Bearer ",
        "access_token\":\"",
        "refresh_token\":\"",
        "client_secret=",
        "refresh_token=",
        "token=",
    ];

    let mut result = text.to_string();
    for pattern in patterns {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let start = search_from + found + pattern.len();
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED]");
            search_from = start + "[REDACTED]".len();
        }
    }

    result
}
