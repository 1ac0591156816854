//! HUD readout: the display values the presentation layer shows each frame

use std::fmt;

use serde::Serialize;

use crate::sim::{GameState, PowerUpKind};

/// An active power-up and its whole seconds left (rounded up)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerUpTimer {
    pub kind: PowerUpKind,
    pub seconds_left: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudReadout {
    pub score: u64,
    /// Meters, floored
    pub distance: u64,
    pub power_ups: Vec<PowerUpTimer>,
}

impl HudReadout {
    /// Read display values; `ticks_per_second` converts timers to seconds
    pub fn from_state(state: &GameState, ticks_per_second: u32) -> Self {
        let tps = ticks_per_second.max(1);
        let power_ups = PowerUpKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let timer = state.player.effect(kind);
                timer.is_active().then(|| PowerUpTimer {
                    kind,
                    seconds_left: timer.remaining().div_ceil(tps),
                })
            })
            .collect();

        Self {
            score: state.score,
            distance: state.distance_floor(),
            power_ups,
        }
    }

    pub fn score_text(&self) -> String {
        format!("SCORE: {}", self.score)
    }

    pub fn distance_text(&self) -> String {
        format!("DISTANCE: {}m", self.distance)
    }

    pub fn power_up_text(&self) -> String {
        self.power_ups
            .iter()
            .map(|p| format!("{} ({}s)", p.kind.label(), p.seconds_left))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for HudReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.score_text(), self.distance_text())?;
        if !self.power_ups.is_empty() {
            write!(f, "  {}", self.power_up_text())?;
        }
        Ok(())
    }
}
