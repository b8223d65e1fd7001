use crate::ui::model::{DEFAULT_WIDTH, Model};
use crate::ui::render::styles::STYLE_MODELINE;
use crate::ui::render::util::display_width;
use lipgloss::Color;

pub fn render_modeline(m: &Model, inner_max: usize, mode: &str) -> String {
    let total_pages = m.total_pages();

    // prepare inner styles without padding so spacing is under our control
    let inner_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let key_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
        .padding(0, 0, 0, 0);
    let pag_style = STYLE_MODELINE.clone().faint(true).padding(0, 0, 0, 0);

    let pairs_def: Vec<(&str, &str)> =
        vec![("⏎", "open"), ("↑/↓", "select"), ("^U", "clear"), ("⎋", "quit")];

    // rendered pair and its plain width
    let pairs: Vec<(String, usize)> = pairs_def
        .iter()
        .map(|(k, d)| {
            let plain_len = display_width(d) + 1 + display_width(k);
            let rendered = format!(
                "{}{}{}",
                inner_style.render(d),
                inner_style.render(":"),
                key_style.render(k)
            );
            (rendered, plain_len)
        })
        .collect();
    let pair_sep_width = 2usize;

    let mut pag_plain = String::new();
    if total_pages > 1 {
        pag_plain = format!("Page {}/{}", m.page + 1, total_pages);
    }
    let pag_width = display_width(&pag_plain);

    // mode block has one column of padding on each side, then " | "
    let mode_w = display_width(mode) + 2;
    let sep_w = 3usize;
    let avail = inner_max.saturating_sub(mode_w + sep_w);

    // drop rightmost pairs until left + pagination fits
    let mut pairs_count = pairs.len();
    let width_of = |n: usize| -> usize {
        if n == 0 {
            0
        } else {
            pairs.iter().take(n).map(|(_, w)| *w).sum::<usize>() + pair_sep_width * (n - 1)
        }
    };
    while pairs_count > 0 && width_of(pairs_count) + pag_width > avail {
        pairs_count -= 1;
    }
    let left_width = width_of(pairs_count);
    let left_rendered = pairs
        .iter()
        .take(pairs_count)
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>()
        .join(&inner_style.render("  "));

    let pad = avail.saturating_sub(left_width + pag_width + 2);
    let filler = if pad > 0 {
        STYLE_MODELINE.clone().width(pad as i32).render("")
    } else {
        String::new()
    };
    let pag_rendered = if pag_plain.is_empty() || left_width + pag_width > avail {
        String::new()
    } else {
        pag_style.render(&pag_plain)
    };

    let mode_style = STYLE_MODELINE
        .clone()
        .background(Color::from_rgb(101, 101, 101))
        .padding(0, 1, 0, 1)
        .bold(true);
    let sep_styled = inner_style.render(" | ");
    let trailing_pad = STYLE_MODELINE.render(" ");

    format!(
        "{}{sep_styled}{left_rendered}{filler}{pag_rendered}{trailing_pad}",
        mode_style.render(mode)
    )
}

pub fn render_modeline_padded(m: &Model) -> String {
    let total_width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let inner_max = total_width.saturating_sub(3);
    let modeline = render_modeline(m, inner_max, &m.mode());
    let modeline_single = modeline.replace('\n', " ");
    STYLE_MODELINE
        .clone()
        .width(total_width as i32)
        .render(&modeline_single)
}
