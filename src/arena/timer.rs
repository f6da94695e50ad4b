//! Cooperative timer wheel driving the arena.
//!
//! Timers live inside the battle that owns them, so replacing or leaving a
//! battle drops every pending timer with it. Due times are whole
//! milliseconds; ties fire in [`TimerKind`] order, then in scheduling order.

/// What a timer does when it fires. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// End of the "READY? / FIGHT!" banner.
    Ready,
    SpecialImpact,
    SpecialRecovery,
    PlayerAction,
    EnemyAction,
    /// One-second step of the post-battle countdown.
    Countdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timer {
    kind: TimerKind,
    due_ms: u64,
    period_ms: Option<u64>,
    seq: u64,
}

impl Timer {
    fn order_key(&self) -> (u64, TimerKind, u64) {
        (self.due_ms, self.kind, self.seq)
    }
}

pub fn seconds_to_ms(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}

#[derive(Debug, Clone, Default)]
pub struct TimerWheel {
    now_ms: u64,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerWheel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fires once, `delay` seconds from now.
    pub fn schedule_once(&mut self, kind: TimerKind, delay: f64) {
        self.push(kind, seconds_to_ms(delay), None);
    }

    /// Fires every `period` seconds, first time one period from now.
    pub fn schedule_repeating(&mut self, kind: TimerKind, period: f64) {
        let period_ms = seconds_to_ms(period).max(1);
        self.push(kind, period_ms, Some(period_ms));
    }

    fn push(&mut self, kind: TimerKind, delay_ms: u64, period_ms: Option<u64>) {
        self.timers.push(Timer {
            kind,
            due_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pops the earliest timer due at or before `until_ms` and moves the clock
    /// to its due time. Repeating timers are rescheduled one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerKind> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| t.order_key())
            .map(|(i, _)| i)?;

        let timer = self.timers[index];
        self.now_ms = self.now_ms.max(timer.due_ms);
        match timer.period_ms {
            Some(period) => {
                self.timers[index].due_ms = timer.due_ms.saturating_add(period);
                self.timers[index].seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.timers.swap_remove(index);
            }
        }
        Some(timer.kind)
    }

    /// Moves the clock forward once no more timers are due.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
