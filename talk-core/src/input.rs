//! Atomic switch input state, safe for use in interrupt contexts
//!
//! The ISR (or the polling scan task standing in for it) records press
//! and release edges here; the engine task drains completed presses and
//! watches the idle time for gap boundaries.

use portable_atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::types::SwitchId;

const NO_PRESS: u8 = u8::MAX;

/// Debounced edge recording for one or two user switches
pub struct SwitchInput {
    pressed: [AtomicBool; 2],
    press_start: [AtomicU32; 2],
    last_edge: [AtomicU32; 2],
    last_activity: AtomicU32,
    pending_switch: AtomicU8,
    pending_held: AtomicU32,
}

impl SwitchInput {
    pub const fn new() -> Self {
        Self {
            pressed: [AtomicBool::new(false), AtomicBool::new(false)],
            press_start: [AtomicU32::new(0), AtomicU32::new(0)],
            last_edge: [AtomicU32::new(0), AtomicU32::new(0)],
            last_activity: AtomicU32::new(0),
            pending_switch: AtomicU8::new(NO_PRESS),
            pending_held: AtomicU32::new(0),
        }
    }

    /// Record a switch edge (called from interrupt handler or scan task).
    /// Edges inside the debounce window are ignored. A release completes
    /// a press and parks it until [`take_press`](Self::take_press).
    pub fn update(&self, switch: SwitchId, state: bool, now_ms: u32, debounce_ms: u32) {
        let i = switch.index();
        if self.pressed[i].load(Ordering::Relaxed) == state {
            return;
        }
        let last = self.last_edge[i].load(Ordering::Relaxed);
        if now_ms.saturating_sub(last) < debounce_ms {
            return;
        }
        self.last_edge[i].store(now_ms, Ordering::Relaxed);
        self.last_activity.store(now_ms, Ordering::Relaxed);
        self.pressed[i].store(state, Ordering::Relaxed);

        if state {
            self.press_start[i].store(now_ms, Ordering::Relaxed);
        } else {
            let held = now_ms.saturating_sub(self.press_start[i].load(Ordering::Relaxed));
            self.pending_held.store(held, Ordering::Relaxed);
            self.pending_switch.store(i as u8, Ordering::Relaxed);
        }
    }

    /// Take the most recently completed press, if one is parked:
    /// `(switch, held milliseconds)`
    pub fn take_press(&self) -> Option<(SwitchId, u32)> {
        let raw = self.pending_switch.swap(NO_PRESS, Ordering::Relaxed);
        let switch = match raw {
            0 => SwitchId::Primary,
            1 => SwitchId::Secondary,
            _ => return None,
        };
        Some((switch, self.pending_held.load(Ordering::Relaxed)))
    }

    pub fn is_pressed(&self, switch: SwitchId) -> bool {
        self.pressed[switch.index()].load(Ordering::Relaxed)
    }

    pub fn any_pressed(&self) -> bool {
        self.is_pressed(SwitchId::Primary) || self.is_pressed(SwitchId::Secondary)
    }

    /// Milliseconds since the last recorded edge
    pub fn idle_for(&self, now_ms: u32) -> u32 {
        now_ms.saturating_sub(self.last_activity.load(Ordering::Relaxed))
    }

    #[cfg(any(test, feature = "test-utils"))]
    pub fn reset(&self) {
        for i in 0..2 {
            self.pressed[i].store(false, Ordering::Relaxed);
            self.press_start[i].store(0, Ordering::Relaxed);
            self.last_edge[i].store(0, Ordering::Relaxed);
        }
        self.last_activity.store(0, Ordering::Relaxed);
        self.pending_switch.store(NO_PRESS, Ordering::Relaxed);
        self.pending_held.store(0, Ordering::Relaxed);
    }
}

impl Default for SwitchInput {
    fn default() -> Self {
        Self::new()
    }
}
