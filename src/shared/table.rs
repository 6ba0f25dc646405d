//! Table and text layout helpers used by the CLI.
//! Widths are terminal columns: ANSI color codes count as zero and wide
//! (CJK, kana, hangul) characters count as two.

use crate::text::char_width;

/// Render a simple text table. Column widths are auto-computed from the widest
/// cell (header or row).
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> =
        headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format_row(headers, &widths));
    out.push('\n');
    out.push_str(&"=".repeat(display_len(&format_row(headers, &widths))));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (cell, width) in row.iter().zip(widths.iter()) {
        let plain_len = display_len(cell);
        parts.push(pad_field(cell, *width, plain_len));
    }
    parts.join(" | ").trim_end().to_string()
}

/// Right-pad a field based on visible length.
pub fn pad_field(display: &str, target: usize, plain_len: usize) -> String {
    let mut out = display.to_string();
    let padding = target.saturating_sub(plain_len);
    out.push_str(&" ".repeat(padding));
    out
}

/// Truncate text to a column width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_len(text) <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Visible width of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += char_width(ch);
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_len_skips_ansi_and_counts_wide() {
        assert_eq!(display_len("\x1b[1mabc\x1b[0m"), 3);
        assert_eq!(display_len("日本"), 4);
    }

    #[test]
    fn truncate_respects_wide_chars() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello world", 6), "hello…");
        assert_eq!(truncate_with_ellipsis("日本語テキスト", 6), "日本…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn table_pads_columns() {
        let headers = vec!["ID".to_string(), "Title".to_string()];
        let rows = vec![
            vec!["1".to_string(), "メモ".to_string()],
            vec!["10".to_string(), "x".to_string()],
        ];
        let out = render_table(&headers, &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID | Title");
        assert_eq!(lines[1], "==========");
        assert_eq!(lines[2], "1  | メモ");
        assert_eq!(lines[3], "10 | x");
    }
}
