//! Text sanitizing applied to every free-text input before it is stored.

/// Cleans free text before persistence
pub trait Sanitizer: Send + Sync {
    fn clean(&self, input: &str) -> String;
}

/// Escapes HTML markup so stored names render as plain text
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    fn clean(&self, input: &str) -> String {
        html_escape(input)
    }
}

/// HTML-escape a string.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(HtmlSanitizer.clean("Alice Smith"), "Alice Smith");
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(
            HtmlSanitizer.clean("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"
        );
        assert_eq!(HtmlSanitizer.clean("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
    }
}
