/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// An `<iframe>` that renders `document` with scripts enabled but without
/// same-origin access or top-level navigation.
pub fn sandboxed_frame(document: &str) -> String {
    format!(
        r#"<iframe sandbox="allow-scripts" title="Card preview" srcdoc="{}"></iframe>"#,
        escape_attribute(document)
    )
}
