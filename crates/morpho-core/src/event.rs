//! Event log — bounded FIFO of timestamped observations.
//!
//! Entries arrive in time order, so eviction only ever inspects the head.
//! The clock is append-only for the lifetime of the owning agent: clearing
//! the log never rewinds it.

use crate::types::{EventValue, Tick};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A timestamped observation vector at a grid position. Immutable once
/// appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub values: Vec<EventValue>,
    pub x: i32,
    pub y: i32,
    pub time: Tick,
}

/// Time-ordered FIFO of recent events, keyed by a monotonically increasing
/// tick counter.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: VecDeque<Event>,
    time: Tick,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tick. Events recorded now carry this timestamp.
    pub fn now(&self) -> Tick {
        self.time
    }

    /// Record an observation at the current tick.
    pub fn record(&mut self, values: Vec<EventValue>, x: i32, y: i32) {
        self.events.push_back(Event {
            values,
            x,
            y,
            time: self.time,
        });
    }

    /// Drop head entries older than `max_age` ticks relative to now.
    pub fn evict(&mut self, max_age: Tick) {
        while let Some(oldest) = self.events.front() {
            if self.time - oldest.time > max_age {
                self.events.pop_front();
            } else {
                break;
            }
        }
    }

    /// Advance the clock by one tick.
    pub fn advance(&mut self) {
        self.time += 1;
    }

    /// Empty the log. The clock is untouched: ticks are append-only forever
    /// for the owning agent.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_tick(log: &mut EventLog, value: i32) {
        log.record(vec![Some(value)], 0, 0);
        log.evict(2);
        log.advance();
    }

    #[test]
    fn evicts_from_head_only() {
        let mut log = EventLog::new();
        for v in 0..5 {
            record_tick(&mut log, v);
        }
        // max age 2 keeps ages 0..=2 relative to the tick they were
        // recorded on.
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().next().unwrap().values[0], Some(2));
    }

    #[test]
    fn clear_keeps_clock() {
        let mut log = EventLog::new();
        record_tick(&mut log, 7);
        record_tick(&mut log, 8);
        let t = log.now();
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.now(), t);
    }

    #[test]
    fn same_tick_observations_share_timestamp() {
        let mut log = EventLog::new();
        log.record(vec![Some(1)], 0, 0);
        log.record(vec![Some(2)], 1, 0);
        log.advance();
        let times: Vec<Tick> = log.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0, 0]);
    }
}
