use lipgloss::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

// Pads every line to `width` and the block to exactly `height` lines.
pub fn fit_block(lines: Vec<String>, width: usize, height: usize) -> String {
    let line_style = Style::new().width(width as i32);
    let mut fitted: Vec<String> = lines
        .into_iter()
        .take(height)
        .map(|l| line_style.render(&l))
        .collect();
    while fitted.len() < height {
        fitted.push(line_style.render(""));
    }
    fitted.join("\n")
}

/// Terminal columns taken by `s`; CJK names count two per char.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

// longest prefix of `s` that fits in `max` columns
pub fn truncate_width(s: &str, max: usize) -> String {
    let mut used = 0usize;
    s.chars()
        .take_while(|&c| {
            used += char_width(c);
            used <= max
        })
        .collect()
}

// keeps the end of `s`, which is where the cursor is
pub fn tail_width(s: &str, max: usize) -> String {
    let mut used = 0usize;
    let mut tail: Vec<char> = s
        .chars()
        .rev()
        .take_while(|&c| {
            used += char_width(c);
            used <= max
        })
        .collect();
    tail.reverse();
    tail.into_iter().collect()
}
