//! Repeating timers over virtual time.
//!
//! `Scheduler` never reads a clock itself: callers move time forward with
//! [`Scheduler::advance`] or [`Scheduler::advance_to`], and every interval
//! that falls due fires with the virtual time it was due at. Tests step it
//! deterministically; the CLI watch loop feeds it the wall clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Milliseconds since the Unix epoch according to the system clock.
pub fn wall_clock_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Cancels the interval it was returned for.
#[derive(Debug, Clone)]
pub struct IntervalHandle {
    cancelled: Rc<Cell<bool>>,
}

impl IntervalHandle {
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

struct Interval {
    period_ms: i64,
    next_due: i64,
    callback: Box<dyn FnMut(i64)>,
    cancelled: Rc<Cell<bool>>,
}

pub struct Scheduler {
    now_ms: i64,
    intervals: Vec<Interval>,
}

impl Scheduler {
    pub fn new(start_ms: i64) -> Self {
        Scheduler {
            now_ms: start_ms,
            intervals: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Runs `callback` every `period`, first one period from now.
    pub fn every(&mut self, period: Duration, callback: impl FnMut(i64) + 'static) -> IntervalHandle {
        let period_ms = i64::try_from(period.as_millis()).unwrap_or(i64::MAX).max(1);
        let cancelled = Rc::new(Cell::new(false));
        self.intervals.push(Interval {
            period_ms,
            next_due: self.now_ms.saturating_add(period_ms),
            callback: Box::new(callback),
            cancelled: cancelled.clone(),
        });
        IntervalHandle { cancelled }
    }

    pub fn next_due(&self) -> Option<i64> {
        self.intervals
            .iter()
            .filter(|iv| !iv.cancelled.get())
            .map(|iv| iv.next_due)
            .min()
    }

    pub fn advance(&mut self, by: Duration) -> usize {
        let by_ms = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.advance_to(self.now_ms.saturating_add(by_ms))
    }

    /// Moves virtual time to `target_ms`, firing due intervals in time order
    /// (registration order on ties). Returns how many callbacks ran.
    pub fn advance_to(&mut self, target_ms: i64) -> usize {
        let mut fired = 0usize;
        loop {
            self.intervals.retain(|iv| !iv.cancelled.get());
            let due = self
                .intervals
                .iter()
                .enumerate()
                .filter(|(_, iv)| iv.next_due <= target_ms)
                .min_by_key(|(i, iv)| (iv.next_due, *i))
                .map(|(i, _)| i);
            let Some(i) = due else { break };
            let iv = &mut self.intervals[i];
            self.now_ms = iv.next_due;
            iv.next_due = iv.next_due.saturating_add(iv.period_ms);
            (iv.callback)(self.now_ms);
            fired += 1;
        }
        if target_ms > self.now_ms {
            self.now_ms = target_ms;
        }
        fired
    }

    pub fn active(&self) -> usize {
        self.intervals.iter().filter(|iv| !iv.cancelled.get()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn fires_once_per_elapsed_period() {
        let mut s = Scheduler::new(0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        s.every(Duration::from_millis(500), move |now| sink.borrow_mut().push(now));
        assert_eq!(s.advance(Duration::from_millis(499)), 0);
        assert_eq!(s.advance(Duration::from_millis(1)), 1);
        assert_eq!(s.advance(Duration::from_millis(1200)), 2);
        assert_eq!(*seen.borrow(), vec![500, 1000, 1500]);
        assert_eq!(s.now_ms(), 1700);
        assert_eq!(s.next_due(), Some(2000));
    }

    #[test]
    fn cancelled_interval_stops_firing() {
        let mut s = Scheduler::new(1_000);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let handle = s.every(Duration::from_millis(100), move |_| c.set(c.get() + 1));
        s.advance(Duration::from_millis(300));
        handle.cancel();
        assert!(handle.is_cancelled());
        s.advance(Duration::from_millis(1_000));
        assert_eq!(count.get(), 3);
        assert_eq!(s.active(), 0);
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn interleaves_intervals_in_time_order() {
        let mut s = Scheduler::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = log.clone();
        let b = log.clone();
        s.every(Duration::from_millis(300), move |t| a.borrow_mut().push(("a", t)));
        s.every(Duration::from_millis(200), move |t| b.borrow_mut().push(("b", t)));
        s.advance_to(600);
        assert_eq!(
            *log.borrow(),
            vec![("b", 200), ("a", 300), ("b", 400), ("a", 600), ("b", 600)]
        );
    }
}
