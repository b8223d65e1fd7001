use crate::countdown::CountdownBoard;
use crate::loader::NameCache;
use crate::suggest::{Suggestion, SuggestionBox};

// small constants reused by rendering code
pub const INPUT_BLOCK_LINES: usize = 3;
pub const MODELINE_LINES: usize = 1;
pub const DEFAULT_WIDTH: usize = 80;

#[derive(Debug, Default)]
pub struct Model {
    pub query: String,
    pub suggestions: SuggestionBox,
    pub cache: NameCache,
    // a names fetch is in flight
    pub loading: bool,
    pub selected: usize,
    // pagination
    pub page: usize,
    pub per_page: usize,
    pub screen_width: usize,
    pub board: CountdownBoard,
    pub ticking: bool,
    pub exit_link: String,
}

pub fn initial_model(board: CountdownBoard) -> Model {
    let mut m = Model {
        board,
        ..Model::default()
    };
    m.ticking = m.board.prepare();
    m
}

impl Model {
    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) -> Option<crate::ui::Effect> {
        crate::ui::update::handle_update(self, msg)
    }

    pub fn mode(&self) -> String {
        if self.loading {
            return "loading names".to_string();
        }
        if self.query.is_empty() {
            return "starlight".to_string();
        }
        match self.suggestions.len() {
            1 => "1 match".to_string(),
            n => format!("{n} matches"),
        }
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.items().get(self.selected)
    }

    /// Lines taken by the countdown block below the list.
    pub fn counter_lines(&self) -> usize {
        if self.board.is_visible() {
            self.board.counters.len()
        } else {
            0
        }
    }

    pub fn reserved_lines(&self) -> usize {
        INPUT_BLOCK_LINES + MODELINE_LINES + self.counter_lines()
    }

    pub fn total_pages(&self) -> usize {
        let total = self.suggestions.len();
        if total == 0 || self.per_page == 0 {
            1
        } else {
            total.div_ceil(self.per_page)
        }
    }

    // keep the page showing the selected row
    pub fn sync_page(&mut self) {
        self.page = if self.per_page == 0 {
            0
        } else {
            self.selected / self.per_page
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{Container, CounterElement};

    #[test]
    fn initial_model_reveals_board_and_starts_ticking() {
        let board = CountdownBoard::new(Some(Container::default()), vec![CounterElement::new("a", "1")]);
        let m = initial_model(board);
        assert!(m.ticking);
        assert!(m.board.is_visible());
        assert_eq!(m.reserved_lines(), INPUT_BLOCK_LINES + MODELINE_LINES + 1);
    }

    #[test]
    fn no_counters_no_ticking() {
        let m = initial_model(CountdownBoard::default());
        assert!(!m.ticking);
        assert_eq!(m.counter_lines(), 0);
        assert_eq!(m.mode(), "starlight");
        assert_eq!(m.total_pages(), 1);
    }
}
