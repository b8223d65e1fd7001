// UI module root: model, update and render live in focused submodules under `ui/`

pub mod model;
pub mod render;
pub mod run;
pub mod update;

pub use model::{Model, initial_model};
pub use render::{
    render_counters, render_full, render_input_block, render_main_content, render_modeline,
};
pub use run::run;
pub use update::handle_update;

use crate::names::NameIndex;

// Messages used by the update logic
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    Rune(char),
    KeyBackspace,
    ClearQuery,
    KeyUp,
    KeyDown,
    KeyEnter,
    NamesLoaded(Result<NameIndex, String>),
    Tick { now_ms: i64 },
}

// Side effects requested by an update; the runner turns them into commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    FetchNames,
    ScheduleTick,
    Quit,
}
