//! Account id generation.
//!
//! Ids are decimal milliseconds since the Unix epoch, the format existing
//! blobs already use. The generator never hands out the same id twice and
//! never goes backwards, even when several accounts are created within one
//! millisecond or the clock steps back. The one exception is a stored id of
//! `u64::MAX`: nothing sorts after it, so the generator restarts from the
//! clock and the store skips any id already taken.

use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// Makes sure future ids sort after an id already in use. Non-numeric
    /// ids are ignored since they cannot collide with generated ones.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<u64>() {
            self.last = self.last.max(value);
        }
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(now_millis())
    }

    fn next_at(&mut self, now: u64) -> String {
        self.last = match self.last.checked_add(1) {
            Some(bumped) => now.max(bumped),
            None => now,
        };
        self.last.to_string()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
