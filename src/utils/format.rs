// Text Formatting Utilities

/// 按字符截断文本，超出时追加 `...`
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// 只保留前 `max_lines` 行
pub fn head_lines(text: &str, max_lines: usize) -> (String, usize) {
    let total = text.lines().count();
    let head = text.lines().take(max_lines).collect::<Vec<_>>().join("\n");
    (head, total.saturating_sub(max_lines))
}
