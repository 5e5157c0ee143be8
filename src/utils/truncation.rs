const MAX_ERROR_LENGTH: usize = 2_000;
const MAX_LOG_LENGTH: usize = 200;

fn truncate_at(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Cap an upstream error body before it lands in an error message.
pub fn truncate_error(error: &str) -> String {
    truncate_at(error, MAX_ERROR_LENGTH)
}

/// Short preview of user text for log lines.
pub fn truncate_for_log(text: &str) -> String {
    truncate_at(text, MAX_LOG_LENGTH)
}
