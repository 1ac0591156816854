//! Countdown timers shared by power-ups, the tongue animation and floating messages

use serde::{Deserialize, Serialize};

/// A tick countdown. `active` always equals `remaining > 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTimer {
    active: bool,
    remaining: u32,
}

impl EffectTimer {
    /// A timer already running for `duration` ticks
    pub fn started(duration: u32) -> Self {
        let mut timer = Self::default();
        timer.start(duration);
        timer
    }

    /// (Re)start at the full duration; an active timer is reset, not extended
    pub fn start(&mut self, duration: u32) {
        self.remaining = duration;
        self.active = duration > 0;
    }

    /// Count down one tick. Returns true on the tick the timer expires.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Fraction of `duration` still left, in [0, 1]
    pub fn fraction_of(&self, duration: u32) -> f32 {
        if duration == 0 {
            return 0.0;
        }
        (self.remaining as f32 / duration as f32).clamp(0.0, 1.0)
    }
}
