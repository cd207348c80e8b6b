use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

pub fn highlighted_border_style(is_highlighted: bool, highlight: Color, border: Color) -> Style {
    if is_highlighted {
        Style::default().fg(highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(border)
    }
}

/// Resolve a configured color name such as `green` or `#ff8800`.
pub fn parse_color(name: &str, fallback: Color) -> Color {
    match Color::from_str(name.trim()) {
        Ok(color) => color,
        Err(_) => {
            tracing::warn!(name, ?fallback, "Unknown color name, using fallback");
            fallback
        }
    }
}

/// Center `title` in a field of at least `min_len` columns.
///
/// The field is `max(len, min_len - 2) + 2` wide, widened by one when that
/// leaves an odd amount of padding, so both sides always get the same number
/// of spaces.
pub fn pad_title(title: &str, min_len: usize) -> String {
    let len = title.chars().count();
    let mut total = len.max(min_len.saturating_sub(2)) + 2;
    if (total - len) % 2 != 0 {
        total += 1;
    }
    let side = " ".repeat((total - len) / 2);
    format!("{side}{title}{side}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_title_short_strings() {
        assert_eq!(pad_title("a", 7), "   a   ");
        assert_eq!(pad_title("ab", 7), "   ab   ");
        assert_eq!(pad_title("abc", 7), "  abc  ");
        assert_eq!(pad_title("abcd", 7), "  abcd  ");
    }

    #[test]
    fn test_pad_title_long_strings() {
        assert_eq!(pad_title("abcde", 7), " abcde ");
        assert_eq!(pad_title("abcdef", 7), " abcdef ");
        assert_eq!(pad_title("abcdefg", 7), " abcdefg ");
        assert_eq!(pad_title("abcdefgh", 7), " abcdefgh ");
    }

    #[test]
    fn test_pad_title_tiny_field() {
        assert_eq!(pad_title("", 0), "  ");
        assert_eq!(pad_title("[1] Lunch", 1), " [1] Lunch ");
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("green", Color::White), Color::Green);
        assert_eq!(parse_color(" Cyan ", Color::White), Color::Cyan);
        assert_eq!(parse_color("#ff8800", Color::White), Color::Rgb(0xff, 0x88, 0x00));
        assert_eq!(parse_color("not-a-color", Color::Yellow), Color::Yellow);
    }
}
