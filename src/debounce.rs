//! Software debouncing for the toggle button.
//!
//! The button is sampled by polling. Every change of the raw level restarts
//! the debounce timer; the stable level only follows the raw level once it
//! has held for longer than the debounce delay. A toggle is emitted on the
//! stable transition into the pressed level, so one physical press yields at
//! most one toggle no matter how much the contacts chatter.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::Debouncer;
//!
//! // Pull-up wiring: idle high, pressed low
//! let mut button = Debouncer::active_low(250);
//!
//! assert!(!button.update(false, 0));   // press starts, bouncing
//! assert!(!button.update(true, 5));
//! assert!(!button.update(false, 10));
//! assert!(button.update(false, 300));  // stable low for >250ms
//! assert!(!button.update(false, 400)); // held, no repeat
//! ```

/// Default debounce window.
pub const DEFAULT_DEBOUNCE_MS: u64 = 250;

/// Turns noisy raw level samples into clean toggle events.
#[derive(Clone, Debug)]
pub struct Debouncer {
    pressed_level: bool,
    delay_ms: u64,
    last_raw: bool,
    stable: bool,
    last_change_ms: u64,
}

impl Debouncer {
    /// Creates a debouncer.
    ///
    /// `pressed_level` is the raw level that means "pressed"; the idle level
    /// is its inverse.
    pub fn new(pressed_level: bool, delay_ms: u64) -> Self {
        Self {
            pressed_level,
            delay_ms,
            last_raw: !pressed_level,
            stable: !pressed_level,
            last_change_ms: 0,
        }
    }

    /// Debouncer for a pull-up input that reads low when pressed.
    pub fn active_low(delay_ms: u64) -> Self {
        Self::new(false, delay_ms)
    }

    /// Feeds one raw level sample. Returns `true` for a toggle event.
    pub fn update(&mut self, raw: bool, now_ms: u64) -> bool {
        if raw != self.last_raw {
            self.last_change_ms = now_ms;
        }
        self.last_raw = raw;

        if now_ms.saturating_sub(self.last_change_ms) <= self.delay_ms {
            return false;
        }
        if raw == self.stable {
            return false;
        }

        self.stable = raw;
        self.stable == self.pressed_level
    }

    /// Whether the debounced level is currently pressed.
    pub fn is_pressed(&self) -> bool {
        self.stable == self.pressed_level
    }

    /// Debounce window in milliseconds.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::active_low(DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_level_never_toggles() {
        let mut d = Debouncer::active_low(250);
        for t in (0..2000).step_by(10) {
            assert!(!d.update(true, t));
        }
    }

    #[test]
    fn clean_press_toggles_once() {
        let mut d = Debouncer::active_low(250);
        assert!(!d.update(false, 1000));
        assert!(!d.update(false, 1250));
        assert!(d.update(false, 1251));
        assert!(d.is_pressed());
        assert!(!d.update(false, 1500));
    }

    #[test]
    fn release_does_not_toggle() {
        let mut d = Debouncer::active_low(250);
        d.update(false, 1000);
        assert!(d.update(false, 1300));
        assert!(!d.update(true, 1400));
        assert!(!d.update(true, 1700));
        assert!(!d.is_pressed());
    }

    #[test]
    fn short_glitch_is_ignored() {
        let mut d = Debouncer::active_low(250);
        d.update(false, 1000);
        d.update(true, 1100);
        for t in (1100..1600).step_by(10) {
            assert!(!d.update(true, t));
        }
    }

    #[test]
    fn active_high_variant() {
        let mut d = Debouncer::new(true, 50);
        d.update(true, 100);
        assert!(d.update(true, 151));
    }

    #[test]
    fn two_separate_presses_two_toggles() {
        let mut d = Debouncer::active_low(250);
        let mut toggles = 0;
        let levels = [(0, false), (300, false), (400, true), (700, true), (800, false), (1100, false)];
        for (t, level) in levels {
            if d.update(level, t + 1000) {
                toggles += 1;
            }
        }
        assert_eq!(toggles, 2);
    }
}
