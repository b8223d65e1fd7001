use crate::ui::model::Model;
use crate::ui::{Effect, Msg};
use tracing::{debug, warn};

pub fn handle_update(m: &mut Model, msg: Msg) -> Option<Effect> {
    match msg {
        Msg::WindowSize { width, height } => handle_window_size(m, width, height),
        Msg::Rune(r) => handle_rune(m, r),
        Msg::KeyBackspace => handle_key_backspace(m),
        Msg::ClearQuery => handle_clear_query(m),
        Msg::KeyUp => handle_key_up(m),
        Msg::KeyDown => handle_key_down(m),
        Msg::KeyEnter => handle_key_enter(m),
        Msg::NamesLoaded(result) => handle_names_loaded(m, result),
        Msg::Tick { now_ms } => handle_tick(m, now_ms),
    }
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) -> Option<Effect> {
    m.screen_width = width;
    m.per_page = height.saturating_sub(m.reserved_lines());
    m.sync_page();
    None
}

// Re-run the suggestion flow for the current query. Without names the render
// is deferred: one fetch is requested and the loaded message re-runs it.
fn refresh_suggestions(m: &mut Model) -> Option<Effect> {
    m.selected = 0;
    m.page = 0;
    if m.query.is_empty() {
        m.suggestions.clear();
        return None;
    }
    if let Some(index) = m.cache.get() {
        m.suggestions.fill(&m.query, index);
        return None;
    }
    if m.loading {
        return None;
    }
    m.loading = true;
    Some(Effect::FetchNames)
}

fn handle_rune(m: &mut Model, r: char) -> Option<Effect> {
    if r.is_control() {
        return None;
    }
    m.query.push(r);
    refresh_suggestions(m)
}

fn handle_key_backspace(m: &mut Model) -> Option<Effect> {
    m.query.pop()?;
    refresh_suggestions(m)
}

fn handle_clear_query(m: &mut Model) -> Option<Effect> {
    m.query.clear();
    refresh_suggestions(m)
}

fn handle_key_up(m: &mut Model) -> Option<Effect> {
    m.selected = m.selected.saturating_sub(1);
    m.sync_page();
    None
}

fn handle_key_down(m: &mut Model) -> Option<Effect> {
    if m.selected + 1 < m.suggestions.len() {
        m.selected += 1;
    }
    m.sync_page();
    None
}

fn handle_key_enter(m: &mut Model) -> Option<Effect> {
    let link = m.selected_suggestion()?.href();
    m.exit_link = link;
    Some(Effect::Quit)
}

fn handle_names_loaded(m: &mut Model, result: Result<crate::names::NameIndex, String>) -> Option<Effect> {
    m.loading = false;
    match result {
        Ok(index) => {
            debug!(names = index.len(), "names arrived");
            m.cache.install(index);
            refresh_suggestions(m)
        }
        Err(e) => {
            // stays in the waiting state; the next edit fetches again
            warn!(error = %e, "names fetch failed");
            None
        }
    }
}

fn handle_tick(m: &mut Model, now_ms: i64) -> Option<Effect> {
    if !m.ticking {
        return None;
    }
    m.board.tick_all(now_ms);
    Some(Effect::ScheduleTick)
}

#[cfg(test)]
mod tests {
    use crate::countdown::{Container, CountdownBoard, CounterElement};
    use crate::names::NameIndex;
    use crate::ui::{Effect, Msg, initial_model};

    const DOC: &str = r#"{
        "Anzu Futaba": ["Anzu Futaba", 1],
        "Futaba Anzu": ["Anzu Futaba", 1],
        "Kirari Moroboshi": ["Kirari Moroboshi", 2],
        "Kanako Mimura": ["Kanako Mimura", 3]
    }"#;

    fn loaded() -> Msg {
        Msg::NamesLoaded(Ok(NameIndex::from_json(DOC).unwrap()))
    }

    fn type_str(m: &mut crate::ui::Model, s: &str) -> Vec<Effect> {
        s.chars().filter_map(|c| m.update(Msg::Rune(c))).collect()
    }

    #[test]
    fn first_keystroke_requests_a_single_fetch() {
        let mut m = initial_model(CountdownBoard::default());
        let effects = type_str(&mut m, "Ka");
        assert_eq!(effects, vec![Effect::FetchNames]);
        assert!(m.loading);
        assert!(m.suggestions.is_empty());
        assert_eq!(m.mode(), "loading names");
    }

    #[test]
    fn loaded_names_render_the_current_query() {
        let mut m = initial_model(CountdownBoard::default());
        type_str(&mut m, "Kan");
        assert_eq!(m.update(loaded()), None);
        assert!(!m.loading);
        let labels: Vec<String> = m.suggestions.items().iter().map(|s| s.display()).collect();
        assert_eq!(labels, vec!["Kanako Mimura"]);
        // later edits are served from the cache
        assert_eq!(m.update(Msg::KeyBackspace), None);
        assert_eq!(m.suggestions.len(), 2);
    }

    #[test]
    fn empty_query_clears_without_fetch() {
        let mut m = initial_model(CountdownBoard::default());
        assert_eq!(m.update(Msg::KeyBackspace), None);
        assert_eq!(m.update(Msg::ClearQuery), None);
        assert!(!m.loading);
        assert!(!m.cache.is_loaded());
    }

    #[test]
    fn names_arriving_after_query_was_cleared_leave_list_empty() {
        let mut m = initial_model(CountdownBoard::default());
        type_str(&mut m, "A");
        m.update(Msg::ClearQuery);
        assert_eq!(m.update(loaded()), None);
        assert!(m.cache.is_loaded());
        assert!(m.suggestions.is_empty());
    }

    #[test]
    fn failed_fetch_is_retried_on_next_edit() {
        let mut m = initial_model(CountdownBoard::default());
        type_str(&mut m, "A");
        assert_eq!(m.update(Msg::NamesLoaded(Err("503".to_string()))), None);
        assert!(!m.loading);
        assert_eq!(type_str(&mut m, "n"), vec![Effect::FetchNames]);
    }

    #[test]
    fn selection_moves_and_enter_quits_with_link() {
        let mut m = initial_model(CountdownBoard::default());
        m.update(loaded());
        type_str(&mut m, "a");
        assert_eq!(m.suggestions.len(), 3);
        m.update(Msg::KeyDown);
        m.update(Msg::KeyDown);
        m.update(Msg::KeyDown);
        assert_eq!(m.selected, 2);
        m.update(Msg::KeyUp);
        assert_eq!(m.selected, 1);
        let expected = m.selected_suggestion().unwrap().href();
        assert_eq!(m.update(Msg::KeyEnter), Some(Effect::Quit));
        assert_eq!(m.exit_link, expected);
    }

    #[test]
    fn enter_without_suggestions_does_nothing() {
        let mut m = initial_model(CountdownBoard::default());
        assert_eq!(m.update(Msg::KeyEnter), None);
        assert!(m.exit_link.is_empty());
    }

    #[test]
    fn ticks_update_counters_and_rearm() {
        let board = CountdownBoard::new(
            Some(Container::default()),
            vec![CounterElement::new("Live", "1000")],
        );
        let mut m = initial_model(board);
        assert_eq!(m.update(Msg::Tick { now_ms: 995_000 }), Some(Effect::ScheduleTick));
        assert_eq!(m.board.counters[0].text(), "00:00:05");
    }

    #[test]
    fn ticks_are_ignored_without_counters() {
        let mut m = initial_model(CountdownBoard::default());
        assert_eq!(m.update(Msg::Tick { now_ms: 0 }), None);
    }

    #[test]
    fn window_size_leaves_room_for_counters() {
        let board = CountdownBoard::new(
            Some(Container::default()),
            vec![CounterElement::new("a", "1"), CounterElement::new("b", "2")],
        );
        let mut m = initial_model(board);
        m.update(Msg::WindowSize { width: 60, height: 20 });
        assert_eq!(m.per_page, 20 - 3 - 1 - 2);
        assert_eq!(m.screen_width, 60);
    }
}
