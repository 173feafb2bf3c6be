/// Strips a Markdown code fence (```json ... ```) that chat models like to
/// wrap around JSON answers. Text without a fence is returned trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening fence line
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
