//! Display-width helpers for clip previews.
//! Width is counted per character: Han, Hiragana, Katakana and Hangul take two
//! terminal columns, everything else takes one.

/// Inclusive code point ranges of the wide scripts, sorted by start.
const WIDE_RANGES: &[(u32, u32)] = &[
    (0x1100, 0x11FF),   // Hangul Jamo
    (0x2E80, 0x2EF3),   // CJK radicals supplement
    (0x2F00, 0x2FD5),   // Kangxi radicals
    (0x3005, 0x3005),   // ideographic iteration mark
    (0x3007, 0x3007),   // ideographic number zero
    (0x3021, 0x3029),   // Hangzhou numerals
    (0x302E, 0x302F),   // Hangul tone marks
    (0x3038, 0x303B),
    (0x3041, 0x3096),   // Hiragana
    (0x309D, 0x309F),
    (0x30A1, 0x30FA),   // Katakana
    (0x30FD, 0x30FF),
    (0x3131, 0x318E),   // Hangul compatibility Jamo
    (0x31F0, 0x31FF),   // Katakana phonetic extensions
    (0x3200, 0x321E),   // parenthesized Hangul
    (0x3260, 0x327E),   // circled Hangul
    (0x32D0, 0x32FE),   // circled Katakana
    (0x3300, 0x3357),   // squared Katakana
    (0x3400, 0x4DBF),   // CJK extension A
    (0x4E00, 0x9FFF),   // CJK unified ideographs
    (0xA960, 0xA97C),   // Hangul Jamo extended A
    (0xAC00, 0xD7A3),   // Hangul syllables
    (0xD7B0, 0xD7C6),   // Hangul Jamo extended B
    (0xD7CB, 0xD7FB),
    (0xF900, 0xFAD9),   // CJK compatibility ideographs
    (0xFF66, 0xFF6F),   // halfwidth Katakana
    (0xFF71, 0xFF9D),
    (0xFFA0, 0xFFBE),   // halfwidth Hangul
    (0xFFC2, 0xFFC7),
    (0xFFCA, 0xFFCF),
    (0xFFD2, 0xFFD7),
    (0xFFDA, 0xFFDC),
    (0x1AFF0, 0x1AFFE), // Kana extended B
    (0x1B000, 0x1B000),
    (0x1B001, 0x1B11F), // Hiragana in Kana supplement / extended A
    (0x1B120, 0x1B122),
    (0x1B164, 0x1B167),
    (0x1F200, 0x1F200),
    (0x20000, 0x2FA1F), // CJK extensions B..F and compatibility supplement
    (0x30000, 0x323AF), // CJK extensions G..H
];

/// Terminal column width of a single character.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    let hit = WIDE_RANGES
        .binary_search_by(|&(start, end)| {
            if cp < start {
                std::cmp::Ordering::Greater
            } else if cp > end {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok();
    if hit { 2 } else { 1 }
}

/// Sum of [`char_width`] over every character of `s`.
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Splits text into lines no wider than `width - margin` columns.
///
/// The margin leaves room for borders and padding drawn around the preview;
/// the budget never drops below one column.
#[derive(Debug, Clone, Copy)]
pub struct TextWrapper {
    margin: usize,
}

impl TextWrapper {
    pub fn new(margin: usize) -> Self {
        Self { margin }
    }

    pub fn margin(&self) -> usize {
        self.margin
    }

    /// Column budget for a given outer width.
    pub fn budget(&self, width: usize) -> usize {
        width.saturating_sub(self.margin).max(1)
    }

    pub fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let budget = self.budget(width);
        let mut wrapped = Vec::new();
        // `lines` also drops a trailing `\r`, so CRLF text wraps like LF text.
        for line in text.lines() {
            split_by_display_width(line, budget, &mut wrapped);
        }
        wrapped
    }
}

/// An empty line produces nothing, so blank lines never count towards a preview's height.
fn split_by_display_width(line: &str, budget: usize, out: &mut Vec<String>) {
    let mut current = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = char_width(c);
        if used + w > budget && !current.is_empty() {
            out.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    if !current.is_empty() {
        out.push(current);
    }
}

/// Marker appended to a preview that was cut short.
pub const ELLIPSIS_MARKER: &str = "\n…";

/// Height- and width-bounded previews of clip content.
#[derive(Debug, Clone, Copy)]
pub struct ClipTruncator {
    wrapper: TextWrapper,
}

impl ClipTruncator {
    pub fn new(wrapper: TextWrapper) -> Self {
        Self { wrapper }
    }

    /// Returns `content` untouched when it fits in `max_lines` wrapped lines
    /// (or when `max_lines` is zero); otherwise the first `max_lines` wrapped
    /// lines followed by [`ELLIPSIS_MARKER`].
    pub fn truncate(&self, content: &str, max_lines: usize, width: usize) -> String {
        let lines = self.wrapper.wrap(content, width);
        if max_lines == 0 || lines.len() <= max_lines {
            return content.to_string();
        }
        let mut out = lines[..max_lines].join("\n");
        out.push_str(ELLIPSIS_MARKER);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_scripts_take_two_columns() {
        for c in ['漢', '字', 'あ', 'ひ', 'カ', 'ナ', '한', '글', 'ｱ', '𠀋'] {
            assert_eq!(char_width(c), 2, "{c:?}");
        }
    }

    #[test]
    fn other_characters_take_one_column() {
        for c in ['a', 'Z', '0', ' ', '!', 'é', '\u{0301}', 'Ω', 'ж', '→', '😀'] {
            assert_eq!(char_width(c), 1, "{c:?}");
        }
    }

    #[test]
    fn str_width_mixes_narrow_and_wide() {
        assert_eq!(str_width("abc"), 3);
        assert_eq!(str_width("aあb"), 4);
        assert_eq!(str_width(""), 0);
    }

    #[test]
    fn short_text_is_one_unchanged_line() {
        let wrapper = TextWrapper::new(0);
        assert_eq!(wrapper.wrap("hello", 10), vec!["hello"]);
        assert_eq!(wrapper.wrap("hello", 5), vec!["hello"]);
    }

    #[test]
    fn wrap_keeps_source_lines_apart() {
        let wrapper = TextWrapper::new(0);
        assert_eq!(wrapper.wrap("ab\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(wrapper.wrap("ab\n\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(wrapper.wrap("ab\r\ncd\n", 10), vec!["ab", "cd"]);
    }

    #[test]
    fn wrap_subtracts_margin() {
        let wrapper = TextWrapper::new(8);
        assert_eq!(wrapper.budget(12), 4);
        assert_eq!(wrapper.wrap("abcdefghij", 12), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_never_exceeds_budget() {
        let wrapper = TextWrapper::new(2);
        let text = "日本語のテキストと English words が混ざった한국어 line\nsecond 行";
        for width in 4..20 {
            let budget = wrapper.budget(width);
            for line in wrapper.wrap(text, width) {
                assert!(str_width(&line) <= budget, "{line:?} over {budget}");
            }
        }
    }

    #[test]
    fn wide_char_moves_to_next_line() {
        let wrapper = TextWrapper::new(0);
        assert_eq!(wrapper.wrap("aあい", 4), vec!["aあ", "い"]);
    }

    #[test]
    fn budget_is_clamped_to_one_column() {
        let wrapper = TextWrapper::new(8);
        assert_eq!(wrapper.budget(0), 1);
        assert_eq!(wrapper.budget(5), 1);
        assert_eq!(wrapper.wrap("abc", 3), vec!["a", "b", "c"]);
        // A wide character cannot be split, so it sits alone on its line.
        assert_eq!(wrapper.wrap("あい", 0), vec!["あ", "い"]);
    }

    #[test]
    fn truncate_keeps_content_that_fits_exactly() {
        let truncator = ClipTruncator::new(TextWrapper::new(0));
        let content = "one\ntwo\nthree";
        assert_eq!(truncator.truncate(content, 3, 10), content);
        assert_eq!(truncator.truncate(content, 5, 10), content);
    }

    #[test]
    fn truncate_cuts_one_line_over() {
        let truncator = ClipTruncator::new(TextWrapper::new(0));
        let content = "one\ntwo\nthree\nfour";
        assert_eq!(truncator.truncate(content, 3, 10), "one\ntwo\nthree\n…");
    }

    #[test]
    fn truncate_ignores_blank_lines() {
        let truncator = ClipTruncator::new(TextWrapper::new(0));
        assert_eq!(truncator.truncate("a\n\nb", 2, 20), "a\n\nb");
        assert_eq!(truncator.truncate("a\n\n\nb\n\nc", 2, 20), "a\nb\n…");
    }

    #[test]
    fn truncate_counts_wrapped_lines() {
        let truncator = ClipTruncator::new(TextWrapper::new(8));
        // budget 4 -> "abcd", "efgh", "ij"
        assert_eq!(truncator.truncate("abcdefghij", 2, 12), "abcd\nefgh\n…");
        assert_eq!(truncator.truncate("abcdefghij", 3, 12), "abcdefghij");
    }

    #[test]
    fn truncate_with_zero_lines_is_a_no_op() {
        let truncator = ClipTruncator::new(TextWrapper::new(8));
        let content = "a\nb\nc\nd";
        assert_eq!(truncator.truncate(content, 0, 1), content);
    }
}
