use crate::ui::model::{DEFAULT_WIDTH, INPUT_BLOCK_LINES, Model};
use crate::ui::render::styles::{STYLE_INPUT_BOX, STYLE_LINK, STYLE_PROMPT};
use crate::ui::render::util::{display_width, tail_width};

const LOADING_MARK: &str = " …";

pub fn render_input_block(m: &Model) -> Vec<String> {
    let box_width = if m.screen_width >= 2 {
        m.screen_width - 2
    } else {
        DEFAULT_WIDTH
    };
    // border padding takes two columns, the prompt two more
    let room = box_width.saturating_sub(4 + display_width(LOADING_MARK));
    let mut inner = STYLE_PROMPT.render(&format!("> {}", tail_width(&m.query, room)));
    if m.loading {
        inner.push_str(&STYLE_LINK.render(LOADING_MARK));
    }
    let w_i32: i32 = box_width.try_into().unwrap_or(i32::MAX);
    let block = STYLE_INPUT_BOX.clone().width(w_i32).render(&inner);
    let mut out: Vec<String> = block.lines().map(|s| s.to_string()).collect();
    // Ensure the input block occupies exactly INPUT_BLOCK_LINES lines by truncating or padding with empty lines.
    out.truncate(INPUT_BLOCK_LINES);
    while out.len() < INPUT_BLOCK_LINES {
        out.push(String::new());
    }
    out
}
