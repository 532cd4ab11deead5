//! One-shot deferred timers.
//!
//! A [`TimerManager`] holds payloads that become due after a delay. It has no
//! thread of its own: the embedding event loop asks for the
//! [`next_deadline`](TimerManager::next_deadline) and calls
//! [`take_expired`](TimerManager::take_expired) when it is reached.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData<T> {
    fire_at: Instant,
    payload: T,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages pending one-shot timers carrying a payload of type `T`.
pub struct TimerManager<T> {
    timers: SlotMap<TimerId, TimerData<T>>,
    /// Stopped timers are removed from the queue as well, so its length
    /// never exceeds the number of pending timers.
    queue: BinaryHeap<TimerQueueEntry>,
}

impl<T> TimerManager<T> {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires `delay` from now.
    pub fn start_one_shot(&mut self, delay: Duration, payload: T) -> TimerId {
        self.start_one_shot_at(Instant::now(), delay, payload)
    }

    /// Start a one-shot timer that fires `delay` after `now`.
    pub fn start_one_shot_at(&mut self, now: Instant, delay: Duration, payload: T) -> TimerId {
        let fire_at = now + delay;
        let id = self.timers.insert(TimerData { fire_at, payload });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: fire_at,
        });
        tracing::trace!(target: targets::TIMER, ?delay, "one-shot timer started");
        id
    }

    /// Stop a pending timer and hand back its payload.
    pub fn stop(&mut self, id: TimerId) -> Result<T> {
        let data = self.timers.remove(id).ok_or(TimerError::InvalidTimerId)?;
        self.queue.retain(|entry| entry.id != id);
        Ok(data.payload)
    }

    /// The payload of a pending timer.
    pub fn payload(&self, id: TimerId) -> Option<&T> {
        self.timers.get(id).map(|data| &data.payload)
    }

    /// Check whether a timer is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }

    /// The earliest fire time among pending timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.values().map(|data| data.fire_at).min()
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn take_expired(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut expired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_time > now {
                break;
            }
            let entry = *entry;
            self.queue.pop();

            if let Some(data) = self.timers.remove(entry.id) {
                expired.push((entry.id, data.payload));
            }
        }

        if !expired.is_empty() {
            tracing::trace!(target: targets::TIMER, count = expired.len(), "timers expired");
        }
        expired
    }
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let id = timers.start_one_shot_at(start, Duration::from_millis(10), "focus");

        assert!(timers.take_expired(start).is_empty());
        assert!(timers.is_pending(id));

        let fired = timers.take_expired(start + Duration::from_millis(10));
        assert_eq!(fired, vec![(id, "focus")]);
        assert!(!timers.is_pending(id));
        assert!(timers.take_expired(start + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_expired_in_deadline_order() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        timers.start_one_shot_at(start, Duration::from_millis(30), 3);
        timers.start_one_shot_at(start, Duration::from_millis(10), 1);
        timers.start_one_shot_at(start, Duration::from_millis(20), 2);

        assert_eq!(timers.next_deadline(), Some(start + Duration::from_millis(10)));

        let fired: Vec<i32> = timers
            .take_expired(start + Duration::from_millis(25))
            .into_iter()
            .map(|(_, payload)| payload)
            .collect();
        assert_eq!(fired, vec![1, 2]);
        assert_eq!(timers.pending_count(), 1);
    }

    #[test]
    fn test_stop_timer() {
        let mut timers = TimerManager::new();
        let start = Instant::now();
        let id = timers.start_one_shot_at(start, Duration::from_millis(5), 7u8);

        assert_eq!(timers.payload(id), Some(&7));
        assert_eq!(timers.stop(id), Ok(7));
        assert_eq!(timers.stop(id), Err(TimerError::InvalidTimerId));
        assert_eq!(timers.payload(id), None);
        assert!(timers.queue.is_empty());
        assert!(timers.take_expired(start + Duration::from_secs(1)).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
