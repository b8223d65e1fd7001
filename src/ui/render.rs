// Render module split into focused submodules, one per screen region.

pub mod counters;
pub mod full;
pub mod input;
pub mod list;
pub mod modeline;
pub mod styles;
pub mod util;

pub use counters::render_counters;
pub use full::render_full;
pub use input::render_input_block;
pub use list::{render_list_lines, render_main_content};
pub use modeline::{render_modeline, render_modeline_padded};

use crate::ui::model::Model;

impl Model {
    pub fn render_input_block(&self) -> Vec<String> {
        render_input_block(self)
    }

    pub fn render_main_content(&self) -> String {
        render_main_content(self)
    }

    pub fn render_counters(&self) -> Vec<String> {
        render_counters(self)
    }

    pub fn render_full(&self) -> String {
        render_full(self)
    }
}
