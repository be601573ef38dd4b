// Small shared helpers

use chrono::Utc;

pub fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

const COLOR_CODE_CHARS: &str = "0123456789abcdefklmnor";

/// The section-sign character understood by inventory window titles and item
/// names for color formatting.
pub const COLOR_CHAR: char = '\u{00A7}';

/// Translates '&'-style color codes written by operators into the
/// section-sign codes the display layer understands. "&&" escapes a literal
/// ampersand.
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '&' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('&') => {
                chars.next();
                out.push('&');
            }
            Some(&next) if COLOR_CODE_CHARS.contains(next.to_ascii_lowercase()) => {
                chars.next();
                out.push(COLOR_CHAR);
                out.push(next.to_ascii_lowercase());
            }
            _ => out.push('&'),
        }
    }
    out
}

/// True when the text already starts with a section-sign color code.
pub fn starts_with_color_code(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(COLOR_CHAR)
        && chars
            .next()
            .is_some_and(|c| COLOR_CODE_CHARS.contains(c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_translates_ampersand_codes() {
        assert_eq!(colorize("&aShop"), "\u{00A7}aShop");
        assert_eq!(colorize("&4No name set"), "\u{00A7}4No name set");
    }

    #[test]
    fn colorize_keeps_unrecognized_codes_literal() {
        assert_eq!(colorize("Tom && Jerry"), "Tom & Jerry");
        assert_eq!(colorize("AT&T"), "AT&T");
        assert_eq!(colorize("trailing &"), "trailing &");
    }

    #[test]
    fn color_code_prefix_is_detected() {
        assert!(starts_with_color_code(&colorize("&fBlank")));
        assert!(!starts_with_color_code("plain"));
    }
}
