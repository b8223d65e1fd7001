use crate::countdown::CounterElement;
use crate::ui::model::{DEFAULT_WIDTH, Model};
use crate::ui::render::styles::{STYLE_COUNTER, STYLE_COUNTER_LABEL};
use crate::ui::render::util::{display_width, fit_block, truncate_width};

fn render_counter_line(c: &CounterElement, width: usize) -> String {
    let text = truncate_width(c.text(), width);
    if c.label.is_empty() {
        return STYLE_COUNTER.render(&text);
    }
    let room = width.saturating_sub(display_width(&text) + 2);
    let label = truncate_width(&c.label, room);
    if label.is_empty() {
        return STYLE_COUNTER.render(&text);
    }
    format!(
        "{}  {}",
        STYLE_COUNTER_LABEL.render(&label),
        STYLE_COUNTER.render(&text)
    )
}

/// The countdown block; empty while the container is hidden.
pub fn render_counters(m: &Model) -> Vec<String> {
    let height = m.counter_lines();
    if height == 0 {
        return Vec::new();
    }
    let width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let lines: Vec<String> = m
        .board
        .counters
        .iter()
        .map(|c| render_counter_line(c, width))
        .collect();
    fit_block(lines, width, height)
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::countdown::{Container, CountdownBoard, CounterElement};
    use crate::ui::Msg;
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    #[test]
    fn counters_render_label_and_time_left() {
        let board = CountdownBoard::new(
            Some(Container::default()),
            vec![CounterElement::new("Event ends", "90061"), CounterElement::new("", "5")],
        );
        let mut m = crate::ui::initial_model(board);
        m.update(Msg::WindowSize { width: 40, height: 12 });
        m.update(Msg::Tick { now_ms: 0 });
        let lines: Vec<String> = super::render_counters(&m).iter().map(|l| strip_ansi(l)).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "Event ends  1 day, 01:01:01");
        assert_eq!(lines[1].trim_end(), "00:00:05");
        assert!(lines.iter().all(|l| l.chars().count() == 40));
    }

    #[test]
    fn hidden_board_renders_nothing() {
        let m = crate::ui::initial_model(CountdownBoard::default());
        assert!(super::render_counters(&m).is_empty());
    }
}
