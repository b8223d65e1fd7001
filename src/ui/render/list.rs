use crate::suggest::Suggestion;
use crate::ui::model::{DEFAULT_WIDTH, Model};
use crate::ui::render::styles::{STYLE_HIGHLIGHT, STYLE_LINENUM, STYLE_LINK, STYLE_NAME, STYLE_SELECTED};
use crate::ui::render::util::{display_width, fit_block, truncate_width};

fn compute_gutter_width(total: usize) -> usize {
    if total == 0 {
        return 1;
    }
    let gw = ((total as f64).log10().floor() as usize) + 1;
    usize::max(gw, 3)
}

// marker, right-aligned number and separator
fn gutter(num: usize, gutter_width: usize, selected: bool) -> String {
    let marker = if selected { '›' } else { ' ' };
    format!("{marker}{:>1$} │ ", num, gutter_width)
}

// Fit prefix/highlight/suffix into `room` columns, cutting from the right.
fn clip_parts(s: &Suggestion, room: usize) -> (String, String, String) {
    let prefix = truncate_width(&s.prefix, room);
    let room = room - display_width(&prefix);
    let highlight = truncate_width(&s.highlight, room);
    let room = room - display_width(&highlight);
    let suffix = truncate_width(&s.suffix, room);
    (prefix, highlight, suffix)
}

fn render_row(s: &Suggestion, num: usize, gutter_width: usize, selected: bool, width: usize) -> String {
    let gutter_plain = gutter(num, gutter_width, selected);
    let room = width.saturating_sub(display_width(&gutter_plain));
    let (prefix, highlight, suffix) = clip_parts(s, room);
    let name_len = display_width(&prefix) + display_width(&highlight) + display_width(&suffix);
    let name_style = if selected { &*STYLE_SELECTED } else { &*STYLE_NAME };

    let mut pieces = vec![STYLE_LINENUM.render(&gutter_plain)];
    if !prefix.is_empty() {
        pieces.push(name_style.render(&prefix));
    }
    if !highlight.is_empty() {
        pieces.push(STYLE_HIGHLIGHT.render(&highlight));
    }
    if !suffix.is_empty() {
        pieces.push(name_style.render(&suffix));
    }
    let link = format!("  {}", s.href());
    if name_len + display_width(&link) <= room {
        pieces.push(STYLE_LINK.render(&link));
    }
    pieces.join("")
}

/// One line per suggestion on the current page.
pub fn render_list_lines(m: &Model) -> Vec<String> {
    let items = m.suggestions.items();
    let total = items.len();
    let per = if m.per_page == 0 { total } else { m.per_page };
    if per == 0 {
        return Vec::new();
    }
    let width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let gutter_width = compute_gutter_width(total);
    let start = m.page.saturating_mul(per);
    items
        .iter()
        .enumerate()
        .skip(start)
        .take(per)
        .map(|(idx, s)| render_row(s, idx + 1, gutter_width, idx == m.selected, width))
        .collect()
}

pub fn render_main_content(m: &Model) -> String {
    let total_width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let lines = render_list_lines(m);
    let per = if m.per_page == 0 { lines.len() } else { m.per_page };
    // Ensure we return exactly `per` lines each normalized to the terminal width.
    fit_block(lines, total_width, per)
}
