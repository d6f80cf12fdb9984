//! # Fixed-Width Layout
//!
//! Word wrapping, padding and separators for a paper width measured in
//! characters.
//!
//! Every line produced here is exactly `width` characters long: shorter
//! text is padded with spaces and longer text is truncated. Widths count
//! `char`s, not bytes.

use crate::protocol::text::Alignment;

/// Rendered width of `s` in character cells.
#[inline]
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Pad or truncate one line to exactly `width` characters.
///
/// If the text is at least `width` long it is cut to `width` characters
/// with no padding. Otherwise it is padded on the side(s) the alignment
/// asks for; `Center` puts `floor(padding / 2)` spaces on the left and the
/// remainder on the right.
///
/// ## Example
///
/// ```
/// use tillroll::document::layout::align_text;
/// use tillroll::protocol::text::Alignment;
///
/// assert_eq!(align_text("ab", Alignment::Center, 5), " ab  ");
/// assert_eq!(align_text("ab", Alignment::Right, 5), "   ab");
/// assert_eq!(align_text("abcdef", Alignment::Left, 4), "abcd");
/// ```
pub fn align_text(text: &str, align: Alignment, width: usize) -> String {
    let len = text_width(text);
    if len >= width {
        return text.chars().take(width).collect();
    }

    let padding = width - len;
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left = padding / 2;
            let right = padding - left;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
        }
    }
}

/// Greedy word wrap.
///
/// Words are separated by whitespace. A word joins the current line while
/// `len(line) + 1 + len(word) <= width`; otherwise the line is flushed and
/// the word starts the next one. A word is never split, so a single word
/// longer than `width` becomes a line of its own that exceeds the width.
/// [`align_text`] truncates such a line.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = text_width(word);
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` to `width` and align every resulting line.
///
/// Embedded line breaks (`\n` or `\r\n`) start a new paragraph, and each
/// paragraph is laid out on its own. A paragraph that already fits is
/// aligned as a single line without touching its spacing. Longer ones are
/// word-wrapped first. An over-long word is kept whole on its own line and
/// hard-truncated to `width` by the alignment step, so no line ever exceeds
/// the paper width.
pub fn wrap_lines(text: &str, align: Alignment, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![align_text("", align, width)];
    }
    text.lines()
        .flat_map(|paragraph| wrap_paragraph(paragraph, align, width))
        .collect()
}

fn wrap_paragraph(text: &str, align: Alignment, width: usize) -> Vec<String> {
    if text_width(text) <= width {
        return vec![align_text(text, align, width)];
    }

    let lines = wrap_words(text, width);
    if lines.is_empty() {
        return vec![align_text("", align, width)];
    }
    lines
        .iter()
        .map(|line| align_text(line, align, width))
        .collect()
}

/// [`wrap_lines`] joined with `'\n'` (no trailing newline).
///
/// ## Example
///
/// ```
/// use tillroll::document::layout::wrap_and_align;
/// use tillroll::protocol::text::Alignment;
///
/// let out = wrap_and_align("the quick brown fox", Alignment::Left, 10);
/// assert_eq!(out, "the quick \nbrown fox ");
/// ```
pub fn wrap_and_align(text: &str, align: Alignment, width: usize) -> String {
    wrap_lines(text, align, width).join("\n")
}

/// `ch` repeated `width` times.
pub fn separator(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIGNMENTS: [Alignment; 3] = [Alignment::Left, Alignment::Center, Alignment::Right];

    #[test]
    fn test_align_left_right() {
        assert_eq!(align_text("abc", Alignment::Left, 6), "abc   ");
        assert_eq!(align_text("abc", Alignment::Right, 6), "   abc");
    }

    #[test]
    fn test_center_smaller_half_left() {
        // padding 3 → 1 left, 2 right
        assert_eq!(align_text("abc", Alignment::Center, 6), " abc  ");
        // padding 4 → 2 and 2
        assert_eq!(align_text("ab", Alignment::Center, 6), "  ab  ");
    }

    #[test]
    fn test_center_padding_arithmetic() {
        for width in 1..=24usize {
            for len in 1..width {
                let text = "x".repeat(len);
                let out = align_text(&text, Alignment::Center, width);
                let left = out.chars().take_while(|c| *c == ' ').count();
                let right = out.chars().rev().take_while(|c| *c == ' ').count();
                assert_eq!(left, (width - len) / 2, "width {width} len {len}");
                assert_eq!(right, width - len - left, "width {width} len {len}");
            }
        }
    }

    #[test]
    fn test_aligned_length_always_equals_width() {
        let texts = ["", "a", "hello", "exactly10!", "a much longer piece of text"];
        for width in 1..=30usize {
            for text in texts {
                for align in ALIGNMENTS {
                    let out = align_text(text, align, width);
                    assert_eq!(text_width(&out), width, "{text:?} {align:?} {width}");
                }
            }
        }
    }

    #[test]
    fn test_line_breaks_start_new_lines() {
        assert_eq!(
            wrap_lines("1 Main St\nSuite 5", Alignment::Center, 12),
            vec![" 1 Main St  ".to_string(), "  Suite 5   ".to_string()]
        );
        assert_eq!(
            wrap_lines("a\r\n\nb", Alignment::Left, 3),
            vec!["a  ".to_string(), "   ".to_string(), "b  ".to_string()]
        );
        for line in wrap_lines("first line\nsecond much longer line", Alignment::Left, 8) {
            assert_eq!(text_width(&line), 8);
            assert!(!line.contains('\n'));
        }
    }

    #[test]
    fn test_truncation_takes_precedence() {
        assert_eq!(align_text("abcdef", Alignment::Right, 3), "abc");
        assert_eq!(align_text("abc", Alignment::Center, 3), "abc");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        assert_eq!(align_text("café", Alignment::Left, 6), "café  ");
        assert_eq!(align_text("ñandú", Alignment::Left, 3), "ñan");
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Lorem ipsum dolor sit amet consectetur adipiscing elit";
        for width in 5..=20usize {
            for line in wrap_words(text, width) {
                assert!(text_width(&line) <= width, "{line:?} > {width}");
            }
        }
    }

    #[test]
    fn test_wrap_never_splits_fitting_words() {
        let text = "alpha beta gamma delta epsilon";
        let lines = wrap_words(text, 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta", "epsilon"]);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_boundary_uses_separating_space() {
        // "ab cd" is 5 characters: fits at width 5, not at width 4
        assert_eq!(wrap_words("ab cd", 5), vec!["ab cd"]);
        assert_eq!(wrap_words("ab cd", 4), vec!["ab", "cd"]);
    }

    #[test]
    fn test_overlong_word_kept_whole_then_truncated() {
        let words = wrap_words("hi supercalifragilistic yo", 8);
        assert_eq!(words, vec!["hi", "supercalifragilistic", "yo"]);

        let lines = wrap_lines("hi supercalifragilistic yo", Alignment::Left, 8);
        assert_eq!(lines, vec!["hi      ", "supercal", "yo      "]);
    }

    #[test]
    fn test_fitting_text_is_single_line() {
        assert_eq!(
            wrap_and_align("Thank you", Alignment::Center, 13),
            "  Thank you  "
        );
        // Exactly width: no wrapping, no padding
        assert_eq!(wrap_and_align("abc def", Alignment::Left, 7), "abc def");
    }

    #[test]
    fn test_wrapped_lines_are_each_aligned() {
        let out = wrap_and_align("one two three", Alignment::Right, 8);
        assert_eq!(out, " one two\n   three");
        for line in out.split('\n') {
            assert_eq!(text_width(line), 8);
        }
    }

    #[test]
    fn test_whitespace_only_overflow_gives_blank_line() {
        assert_eq!(wrap_lines("       ", Alignment::Left, 3), vec!["   "]);
    }

    #[test]
    fn test_separator() {
        assert_eq!(separator('=', 5), "=====");
        assert_eq!(separator('-', 0), "");
        assert_eq!(text_width(&separator('═', 48)), 48);
    }
}
