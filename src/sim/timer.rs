//! Cancellable periodic spawn timer
//!
//! The spawn cadence is independent of the frame tick. Hosts either deliver
//! firings tagged with the handle they were given at arm time, or feed their
//! own clock into `advance`. Every arm gets a new generation, so a firing that
//! was already queued when the timer was cancelled is recognised as stale.
//! A stalled host clock fires once on resume; missed periods are dropped.

use serde::{Deserialize, Serialize};

/// Generation tag of one armed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Request for hosts that back the timer with a native facility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimerRequest {
    Arm {
        handle: TimerHandle,
        period: f32,
    },
    Disarm { handle: TimerHandle },
}

#[derive(Debug, Clone)]
pub struct SpawnTimer {
    period: f32,
    active: Option<TimerHandle>,
    generation: u64,
    /// Time since the last firing (seconds), for `advance`
    accumulated: f32,
    /// Only hosts with a native timer collect arm/disarm requests
    record_requests: bool,
    requests: Vec<TimerRequest>,
}

impl SpawnTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period,
            active: None,
            generation: 0,
            accumulated: 0.0,
            record_requests: false,
            requests: Vec::new(),
        }
    }

    /// Start or stop queueing `TimerRequest`s. Disabling drops the queue.
    pub fn set_record_requests(&mut self, enabled: bool) {
        self.record_requests = enabled;
        if !enabled {
            self.requests.clear();
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.active
    }

    /// Start firing every `period`. Refuses (returns `None`) if already armed,
    /// so the spawn rate can never double.
    pub fn arm(&mut self) -> Option<TimerHandle> {
        if let Some(handle) = self.active {
            log::warn!("spawn timer already armed ({handle:?}), ignoring second arm");
            return None;
        }
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.active = Some(handle);
        self.accumulated = 0.0;
        self.request(TimerRequest::Arm {
            handle,
            period: self.period,
        });
        Some(handle)
    }

    /// Cancel the current period. Returns the cancelled handle, if any.
    pub fn disarm(&mut self) -> Option<TimerHandle> {
        let handle = self.active.take()?;
        self.accumulated = 0.0;
        self.request(TimerRequest::Disarm { handle });
        Some(handle)
    }

    /// Whether a firing tagged `handle` belongs to the current arm
    pub fn accepts(&self, handle: TimerHandle) -> bool {
        self.active == Some(handle)
    }

    /// Feed elapsed host time; returns whether a period completed.
    ///
    /// Fires at most once per call. When `elapsed` spans several periods the
    /// backlog is dropped and only the partial period carries over.
    pub fn advance(&mut self, elapsed: f32) -> bool {
        if self.active.is_none() || !(elapsed.is_finite() && elapsed > 0.0) {
            return false;
        }
        self.accumulated += elapsed;
        if self.accumulated < self.period {
            return false;
        }
        self.accumulated %= self.period;
        true
    }

    /// Drain pending arm/disarm requests
    pub fn take_requests(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.requests)
    }

    fn request(&mut self, request: TimerRequest) {
        if self.record_requests {
            self.requests.push(request);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_arm_is_refused() {
        let mut timer = SpawnTimer::new(2.6);
        timer.set_record_requests(true);
        let first = timer.arm().unwrap();
        assert_eq!(timer.arm(), None);
        assert_eq!(timer.handle(), Some(first));
        assert_eq!(
            timer.take_requests(),
            vec![TimerRequest::Arm {
                handle: first,
                period: 2.6
            }]
        );
    }

    #[test]
    fn test_disarm_once() {
        let mut timer = SpawnTimer::new(2.6);
        timer.set_record_requests(true);
        let handle = timer.arm().unwrap();
        assert_eq!(timer.disarm(), Some(handle));
        assert_eq!(timer.disarm(), None);
        assert!(!timer.is_armed());
        assert_eq!(timer.take_requests().len(), 2);
        assert!(timer.take_requests().is_empty());
    }

    #[test]
    fn test_stale_handle_rejected_after_rearm() {
        let mut timer = SpawnTimer::new(2.6);
        let old = timer.arm().unwrap();
        timer.disarm();
        let new = timer.arm().unwrap();
        assert_ne!(old, new);
        assert!(!timer.accepts(old));
        assert!(timer.accepts(new));
    }

    #[test]
    fn test_advance_fires_once_per_call() {
        let mut timer = SpawnTimer::new(1.0);
        assert!(!timer.advance(5.0), "disarmed timer never fires");

        timer.arm();
        assert!(!timer.advance(0.6));
        assert!(timer.advance(0.6));
        assert!(!timer.advance(-1.0));

        // a stall worth several periods fires once and keeps only the remainder
        assert!(timer.advance(2.0));
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.4));

        timer.disarm();
        timer.arm();
        // accumulated time does not survive a re-arm
        assert!(!timer.advance(0.9));
    }

    #[test]
    fn test_requests_only_queued_when_recording() {
        let mut timer = SpawnTimer::new(2.6);
        for _ in 0..10 {
            timer.arm();
            timer.disarm();
        }
        assert!(timer.take_requests().is_empty());

        timer.set_record_requests(true);
        timer.arm();
        assert_eq!(timer.take_requests().len(), 1);
        timer.disarm();
        timer.set_record_requests(false);
        assert!(timer.take_requests().is_empty());
    }
}
