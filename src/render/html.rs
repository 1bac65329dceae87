use std::borrow::Cow;

/// Escape text for use inside a single- or double-quoted attribute or as element content.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// ` checked` / ` selected` style boolean attribute, or nothing
pub fn flag(name: &'static str, on: bool) -> &'static str {
    match (name, on) {
        ("checked", true) => " checked",
        ("selected", true) => " selected",
        ("disabled", true) => " disabled",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(escape("arr_1"), Cow::Borrowed("arr_1")));
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(escape("a<'b'> & \"c\""), "a&lt;&#39;b&#39;&gt; &amp; &quot;c&quot;");
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag("checked", true), " checked");
        assert_eq!(flag("checked", false), "");
    }
}
