use crate::schedule::{IntervalHandle, Scheduler, wall_clock_ms};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Default refresh period of the counters.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

const SECS_PER_MIN: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MIN;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountdownError {
    #[error("invalid countdown target {0:?}")]
    InvalidTarget(String),
}

/// Formats the time left. A deadline that has passed shows as `00:00:00`.
pub fn format_remaining(remaining_ms: f64) -> String {
    let total = if remaining_ms.is_finite() && remaining_ms > 0.0 {
        (remaining_ms / 1000.0).floor() as i64
    } else {
        0
    };
    let days = total / SECS_PER_DAY;
    let hours = (total % SECS_PER_DAY) / SECS_PER_HOUR;
    let minutes = (total % SECS_PER_HOUR) / SECS_PER_MIN;
    let seconds = total % SECS_PER_MIN;
    let clock = format!("{hours:02}:{minutes:02}:{seconds:02}");
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Parses a `data-count-to` value: Unix seconds, fractions allowed.
pub fn parse_target(raw: &str) -> Result<f64, CountdownError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| CountdownError::InvalidTarget(raw.to_string()))
}

/// A counter element: the target attribute and the text it displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterElement {
    pub label: String,
    count_to: String,
    text: String,
}

impl CounterElement {
    pub fn new(label: &str, count_to: &str) -> Self {
        CounterElement {
            label: label.to_string(),
            count_to: count_to.to_string(),
            text: String::new(),
        }
    }

    pub fn count_to(&self) -> &str {
        &self.count_to
    }

    pub fn set_count_to(&mut self, raw: &str) {
        self.count_to = raw.to_string();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recomputes the text from the target attribute. On an invalid target
    /// the text is left as it was.
    pub fn tick(&mut self, now_ms: i64) -> Result<(), CountdownError> {
        let target = parse_target(&self.count_to)?;
        self.text = format_remaining(target * 1000.0 - now_ms as f64);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub visible: bool,
}

/// Countdown section of a page: an optional container and its counters.
#[derive(Debug, Clone, Default)]
pub struct CountdownBoard {
    pub container: Option<Container>,
    pub counters: Vec<CounterElement>,
}

impl CountdownBoard {
    pub fn new(container: Option<Container>, counters: Vec<CounterElement>) -> Self {
        CountdownBoard { container, counters }
    }

    /// Shows the container when there is one and reports whether any
    /// counters need ticking.
    pub fn prepare(&mut self) -> bool {
        if let Some(c) = self.container.as_mut() {
            c.visible = true;
        }
        !self.counters.is_empty()
    }

    pub fn is_visible(&self) -> bool {
        self.container.as_ref().is_some_and(|c| c.visible)
    }

    /// All counters on one line, `label: time` or just the time.
    pub fn status_line(&self) -> String {
        self.counters
            .iter()
            .map(|c| {
                if c.label.is_empty() {
                    c.text().to_string()
                } else {
                    format!("{}: {}", c.label, c.text())
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn tick_all(&mut self, now_ms: i64) {
        for counter in self.counters.iter_mut() {
            if let Err(e) = counter.tick(now_ms) {
                warn!(label = %counter.label, "{e}");
            }
        }
    }
}

/// Reveals the board and, when it has counters, ticks them every `period`
/// on `scheduler`. Returns the handle of the started interval.
pub fn init(board: &Rc<RefCell<CountdownBoard>>, scheduler: &mut Scheduler, period: Duration) -> Option<IntervalHandle> {
    if !board.borrow_mut().prepare() {
        return None;
    }
    let board = Rc::clone(board);
    Some(scheduler.every(period, move |now| board.borrow_mut().tick_all(now)))
}

/// Drives `init` from the wall clock: sleeps until the next tick is due,
/// ticks, then hands the board to `redraw`. Stops when `redraw` returns
/// `Ok(false)` or an error, or right away when there are no counters.
pub async fn watch<F, E>(board: CountdownBoard, period: Duration, mut redraw: F) -> Result<(), E>
where
    F: FnMut(&CountdownBoard) -> Result<bool, E>,
{
    let board = Rc::new(RefCell::new(board));
    let mut scheduler = Scheduler::new(wall_clock_ms());
    if init(&board, &mut scheduler, period).is_none() {
        return Ok(());
    }
    while let Some(due) = scheduler.next_due() {
        let wait = due.saturating_sub(wall_clock_ms());
        if wait > 0 {
            tokio::time::sleep(Duration::from_millis(wait as u64)).await;
        }
        scheduler.advance_to(wall_clock_ms());
        let keep_going = redraw(&*board.borrow())?;
        if !keep_going {
            break;
        }
    }
    Ok(())
}
