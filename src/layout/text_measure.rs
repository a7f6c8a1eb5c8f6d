//! Text Measurement
//!
//! The platform's text layer owns real shaping and font metrics. The header
//! only needs a bounding box per title, so measurement sits behind the
//! [`TextMeasurer`] trait.
//!
//! [`EstimatingMeasurer`] is a deterministic stand-in: every grapheme
//! cluster gets an advance in "units" and one unit is half an em.
//! - Most characters: 1 unit
//! - CJK, Hangul, fullwidth forms and emoji (including ZWJ sequences and
//!   flags): 2 units
//! - Combining marks (Arabic harakat, Hebrew niqqud), bidi controls and
//!   other control characters: 0 units

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::types::{Size, TitleStyle};

/// Fraction of an em covered by one width unit.
const UNIT_EM: f32 = 0.5;

/// Bold glyphs run slightly wider.
const BOLD_FACTOR: f32 = 1.06;

/// Line box height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Baseline position inside one line box, from its top.
const BASELINE_FACTOR: f32 = 0.8;

const ELLIPSIS: char = '…';

/// What to do with text wider than the space it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OverflowPolicy {
    /// One line, cut with a trailing ellipsis.
    #[default]
    Truncate,
    /// Wrap onto at most `max_lines`; the last line is truncated.
    Wrap { max_lines: u16 },
}

/// Bounding box of a laid-out string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextBox {
    pub size: Size,
    /// Distance from the top of the box to the first line's baseline.
    pub baseline: f32,
    pub lines: Vec<String>,
    pub truncated: bool,
}

/// Platform text layer seam.
pub trait TextMeasurer {
    fn measure(
        &self,
        text: &str,
        style: &TitleStyle,
        max_width: f32,
        overflow: OverflowPolicy,
    ) -> TextBox;
}

// =============================================================================
// Character widths
// =============================================================================

/// Width of a single character in units.
///
/// East Asian Width via `unicode-width`, with common emoji blocks forced
/// wide. Control characters, combining marks and bidi controls are 0.
#[inline]
pub fn char_units(c: char) -> u32 {
    match c as u32 {
        // Misc symbols and dingbats
        0x2600..=0x27BF => 2,
        // Pictographs, emoticons, transport
        0x1F300..=0x1F64F | 0x1F680..=0x1F6FF => 2,
        // Supplemental pictographs and extended-A
        0x1F900..=0x1F9FF | 0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0) as u32,
    }
}

/// Width of one grapheme cluster in units.
///
/// - Base + combining marks: the base width
/// - ZWJ sequences, VS16, skin tones, keycaps, flags: 2
pub fn grapheme_units(grapheme: &str) -> u32 {
    let mut chars = grapheme.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return 0,
    };
    if grapheme.len() == first.len_utf8() {
        return char_units(first);
    }

    // Regional indicator pair
    if (0x1F1E6..=0x1F1FF).contains(&(first as u32)) {
        return 2;
    }
    for c in chars {
        if matches!(c as u32, 0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF | 0x20E3) {
            return 2;
        }
    }
    char_units(first)
}

/// Width of a string in units.
pub fn text_units(s: &str) -> u32 {
    if s.is_ascii() {
        return s.bytes().filter(|b| !b.is_ascii_control()).count() as u32;
    }
    s.graphemes(true).map(grapheme_units).sum()
}

// =============================================================================
// EstimatingMeasurer
// =============================================================================

/// Deterministic measurer based on per-character advance estimates.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatingMeasurer;

impl EstimatingMeasurer {
    /// Points per unit for a style.
    pub fn advance(style: &TitleStyle) -> f32 {
        let advance = style.font_size * UNIT_EM;
        if style.font_weight.is_bold() {
            advance * BOLD_FACTOR
        } else {
            advance
        }
    }

    pub fn line_height(style: &TitleStyle) -> f32 {
        style.font_size * LINE_HEIGHT_FACTOR
    }
}

impl TextMeasurer for EstimatingMeasurer {
    fn measure(
        &self,
        text: &str,
        style: &TitleStyle,
        max_width: f32,
        overflow: OverflowPolicy,
    ) -> TextBox {
        let advance = Self::advance(style);
        let line_height = Self::line_height(style);
        let max_units = (max_width / advance).floor().max(0.0) as u32;

        let (lines, truncated) = match overflow {
            OverflowPolicy::Truncate => {
                let (line, cut) = truncate_units(text, max_units);
                (vec![line], cut)
            }
            OverflowPolicy::Wrap { max_lines } => wrap_units(text, max_units, max_lines.max(1)),
        };

        let widest = lines.iter().map(|l| text_units(l)).max().unwrap_or(0);
        TextBox {
            size: Size::new(widest as f32 * advance, lines.len() as f32 * line_height),
            baseline: line_height * BASELINE_FACTOR,
            lines,
            truncated,
        }
    }
}

// =============================================================================
// Truncation and wrapping (in units)
// =============================================================================

/// Cut `text` to `max_units`, ending in an ellipsis when anything was dropped.
/// Never cuts inside a grapheme cluster.
fn truncate_units(text: &str, max_units: u32) -> (String, bool) {
    if text_units(text) <= max_units {
        return (text.to_string(), false);
    }

    // Leave room for the ellipsis
    let target = max_units.saturating_sub(char_units(ELLIPSIS));
    let mut result = String::with_capacity(text.len());
    let mut width = 0u32;

    for grapheme in text.graphemes(true) {
        let w = grapheme_units(grapheme);
        if width + w > target {
            break;
        }
        result.push_str(grapheme);
        width += w;
    }

    let kept = result.trim_end().len();
    result.truncate(kept);
    result.push(ELLIPSIS);
    (result, true)
}

/// Greedy word wrap. Words longer than a line are broken between graphemes.
fn wrap_units(text: &str, max_units: u32, max_lines: u16) -> (Vec<String>, bool) {
    let max_units = max_units.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for paragraph in text.split('\n') {
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let joined = if current.is_empty() {
                text_units(word)
            } else {
                text_units(&current) + 1 + text_units(word)
            };

            if joined <= max_units {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            // Break an overlong word into line-sized pieces
            let mut width = 0u32;
            for grapheme in word.graphemes(true) {
                let w = grapheme_units(grapheme);
                if width + w > max_units && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    width = 0;
                }
                current.push_str(grapheme);
                width += w;
            }
        }
        lines.push(std::mem::take(&mut current));
    }

    let max_lines = max_lines as usize;
    if lines.len() <= max_lines {
        return (lines, false);
    }

    let rest = lines.split_off(max_lines - 1).join(" ");
    let (last, _) = truncate_units(&rest, max_units);
    lines.push(last);
    (lines, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FontWeight;

    fn style(size: f32) -> TitleStyle {
        TitleStyle {
            font_size: size,
            font_weight: FontWeight::REGULAR,
            color: None,
            font_family: None,
        }
    }

    #[test]
    fn test_char_units() {
        assert_eq!(text_units("hello"), 5);
        assert_eq!(text_units(""), 0);
        assert_eq!(text_units("a\tb"), 2);
        assert_eq!(text_units("日本"), 4);
    }

    #[test]
    fn test_combining_marks_have_no_width() {
        // "عَ" = ain + fatha
        assert_eq!(text_units("\u{0639}\u{064E}"), 1);
        // Hebrew bet with dagesh
        assert_eq!(text_units("\u{05D1}\u{05BC}"), 1);
        assert_eq!(text_units("\u{200F}abc"), 3);
    }

    #[test]
    fn test_emoji_clusters_are_two_units() {
        // Family ZWJ sequence
        assert_eq!(text_units("\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}"), 2);
        // Flag
        assert_eq!(text_units("\u{1F1FA}\u{1F1F8}"), 2);
        // Thumbs up + skin tone
        assert_eq!(text_units("\u{1F44D}\u{1F3FD}"), 2);
        assert_eq!(grapheme_units("\u{2728}"), 2);
        assert_eq!(grapheme_units(""), 0);
    }

    #[test]
    fn test_arabic_title_width() {
        assert_eq!(text_units("عنوان"), 5);
    }

    #[test]
    fn test_measure_fits() {
        let b = EstimatingMeasurer.measure("Title", &style(20.0), 500.0, OverflowPolicy::Truncate);
        assert_eq!(b.lines, vec!["Title".to_string()]);
        assert!(!b.truncated);
        assert_eq!(b.size.width, 50.0);
        assert!((b.size.height - 24.0).abs() < 1e-4);
        assert!((b.baseline - 19.2).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let mut bold = style(20.0);
        bold.font_weight = FontWeight::BOLD;
        assert!(EstimatingMeasurer::advance(&bold) > EstimatingMeasurer::advance(&style(20.0)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_units("hello", 10), ("hello".to_string(), false));
        assert_eq!(truncate_units("hello world", 7), ("hello…".to_string(), true));
        assert_eq!(truncate_units("hello", 4), ("hel…".to_string(), true));
        assert_eq!(truncate_units("hello", 0), ("…".to_string(), true));
    }

    #[test]
    fn test_truncate_keeps_clusters_whole() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";

        let (line, cut) = truncate_units(&format!("ab{family}cd"), 4);
        assert!(cut);
        assert_eq!(line, "ab…");
        assert!(!line.contains('\u{200D}'));

        let (line, cut) = truncate_units(&format!("{family} family"), 4);
        assert!(cut);
        assert_eq!(line, format!("{family}…"));

        // Base letter keeps its mark
        let (line, _) = truncate_units("\u{0639}\u{064E}\u{0644}\u{0645}", 2);
        assert_eq!(line, "\u{0639}\u{064E}…");
    }

    #[test]
    fn test_measure_keeps_zwj_sequence() {
        let title = "Team \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        // 10pt font -> 8 units, title is 7
        let b = EstimatingMeasurer.measure(title, &style(10.0), 40.0, OverflowPolicy::Truncate);
        assert!(!b.truncated);
        assert_eq!(b.lines, vec![title.to_string()]);
        assert_eq!(b.size.width, 35.0);
    }

    #[test]
    fn test_measure_truncates_to_width() {
        // 10pt font -> 5pt per unit, 40pt = 8 units
        let b = EstimatingMeasurer.measure(
            "Large Title RTL Test",
            &style(10.0),
            40.0,
            OverflowPolicy::Truncate,
        );
        assert!(b.truncated);
        assert_eq!(b.lines, vec!["Large T…".to_string()]);
        assert!(b.size.width <= 40.0);
    }

    #[test]
    fn test_wrap_words() {
        let (lines, cut) = wrap_units("RTL Large Title Test", 11, 3);
        assert_eq!(lines, vec!["RTL Large", "Title Test"]);
        assert!(!cut);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        let (lines, cut) = wrap_units("abcdefghij", 4, 5);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
        assert!(!cut);
    }

    #[test]
    fn test_wrap_breaks_between_graphemes() {
        // Four letters, each with a niqqud point
        let word = "\u{05D0}\u{05B8}\u{05D1}\u{05B8}\u{05D2}\u{05B8}\u{05D3}\u{05B8}";
        let (lines, cut) = wrap_units(word, 3, 5);
        assert!(!cut);
        assert_eq!(
            lines,
            vec!["\u{05D0}\u{05B8}\u{05D1}\u{05B8}\u{05D2}\u{05B8}", "\u{05D3}\u{05B8}"]
        );
    }

    #[test]
    fn test_wrap_limits_lines() {
        let (lines, cut) = wrap_units("one two three four", 5, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one");
        assert!(lines[1].ends_with('…'));
        assert!(cut);
    }

    #[test]
    fn test_wrap_measure_height() {
        let b = EstimatingMeasurer.measure(
            "one two",
            &style(10.0),
            15.0,
            OverflowPolicy::Wrap { max_lines: 4 },
        );
        assert_eq!(b.lines.len(), 2);
        assert!((b.size.height - 24.0).abs() < 1e-4);
    }
}
