//! Display abstraction for workout state visualization.
//!
//! This module defines the [`WorkoutDisplay`] trait for rendering workout
//! state to various display devices (OLED, LCD, etc.).

use core::fmt::Write;

use heapless::String as HString;

use crate::session::{Mode, WorkoutState};

/// Characters per line on a 128 px wide screen with a 6 px font.
pub const LINE_CHARS: usize = 21;

/// One line of screen text.
pub type ScreenLine = HString<LINE_CHARS>;

/// Display trait for rendering workout state.
///
/// Implementors provide hardware-specific rendering for displays like
/// SSD1306 OLED, character LCDs, or simulated displays for testing.
///
/// # Example
///
/// ```ignore
/// use rs_reps::traits::WorkoutDisplay;
/// use rs_reps::WorkoutState;
///
/// struct MyDisplay { /* ... */ }
///
/// impl WorkoutDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear(&mut self) -> Result<(), ()> { Ok(()) }
///     fn render(&mut self, state: &WorkoutState) -> Result<(), ()> {
///         // Draw exercise, set/rep counters, etc.
///         Ok(())
///     }
///     fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait WorkoutDisplay {
    /// Error type for display operations.
    type Error: core::fmt::Debug;

    /// Initializes the display hardware.
    ///
    /// Called once at startup. A failure here is fatal to the device.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Clears the display.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Renders the current workout state.
    ///
    /// Called each loop iteration. Content depends on the mode:
    /// - StepCounting: step tally, or a configuration prompt with no plan
    /// - Ready: start prompt with the first exercise
    /// - Working: exercise name, set and rep counters
    /// - Resting: countdown
    /// - Complete: completion banner
    fn render(&mut self, state: &WorkoutState) -> Result<(), Self::Error>;

    /// Shows a simple message (e.g., for startup or errors).
    ///
    /// # Arguments
    ///
    /// * `line1` - First line of text
    /// * `line2` - Optional second line of text
    fn show_message(&mut self, line1: &str, line2: Option<&str>) -> Result<(), Self::Error>;
}

/// Text content of the screen for one state, independent of the panel.
///
/// Drivers draw the three lines top to bottom. `progress` is a 0..=100 fill
/// level for an optional bar (rep progress while working, rest progress
/// while resting).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Screen {
    /// Heading line.
    pub title: ScreenLine,
    /// Main content line.
    pub body: ScreenLine,
    /// Secondary line, often empty.
    pub footer: ScreenLine,
    /// Bar fill in percent, if the mode shows one.
    pub progress: Option<u8>,
}

impl Screen {
    /// Lays out the per-mode content for a state snapshot.
    ///
    /// ```rust
    /// use rs_reps::traits::Screen;
    /// use rs_reps::WorkoutState;
    ///
    /// let screen = Screen::for_state(&WorkoutState { steps: 1234, plan_configured: true, ..Default::default() });
    /// assert_eq!(screen.title.as_str(), "Steps");
    /// assert_eq!(screen.body.as_str(), "1234");
    /// ```
    pub fn for_state(state: &WorkoutState) -> Self {
        let mut screen = Screen::default();

        // Overlong text is cut at LINE_CHARS; write! errors only on overflow
        match state.mode {
            Mode::StepCounting if !state.plan_configured => {
                let _ = screen.title.push_str("Steps");
                let _ = write!(screen.body, "{}", state.steps);
                let _ = screen.footer.push_str("Configure via WiFi");
            }
            Mode::StepCounting => {
                let _ = screen.title.push_str("Steps");
                let _ = write!(screen.body, "{}", state.steps);
                let _ = screen.footer.push_str("Press to work out");
            }
            Mode::Configuring => {
                let _ = screen.title.push_str("Waiting for plan");
                let _ = screen.body.push_str("Open config page");
            }
            Mode::Ready => {
                let _ = screen.title.push_str("Ready");
                push_truncated(&mut screen.body, &state.exercise_name);
                let _ = screen.footer.push_str("Press to start");
            }
            Mode::Working => {
                push_truncated(&mut screen.title, &state.exercise_name);
                let _ = write!(screen.body, "Set {}/{}", state.set_number, state.total_sets);
                let _ = write!(screen.footer, "Rep {}/{}", state.rep_number, state.target_reps);
                screen.progress = Some(percent(state.rep_number as u32, state.target_reps as u32));
            }
            Mode::Resting => {
                let _ = screen.title.push_str("Rest");
                let _ = write!(screen.body, "{} s", state.rest_remaining_s);
                let _ = write!(screen.footer, "Next: set {}", state.set_number);
            }
            Mode::Complete => {
                let _ = screen.title.push_str("Workout complete!");
                let _ = write!(screen.footer, "Steps: {}", state.steps);
            }
        }

        screen
    }
}

fn push_truncated(line: &mut ScreenLine, text: &str) {
    for c in text.chars() {
        if line.push(c).is_err() {
            break;
        }
    }
}

fn percent(done: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    (done.min(total) * 100 / total) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::ExerciseName;

    fn name(s: &str) -> ExerciseName {
        let mut n = ExerciseName::new();
        n.push_str(s).unwrap();
        n
    }

    #[test]
    fn waiting_prompt_without_plan() {
        let screen = Screen::for_state(&WorkoutState::default());
        assert_eq!(screen.title.as_str(), "Steps");
        assert_eq!(screen.footer.as_str(), "Configure via WiFi");
        assert_eq!(screen.progress, None);
    }

    #[test]
    fn working_shows_counters_and_progress() {
        let state = WorkoutState {
            mode: Mode::Working,
            plan_configured: true,
            exercise_name: name("Lateral Raise"),
            set_number: 2,
            total_sets: 3,
            rep_number: 5,
            target_reps: 10,
            ..Default::default()
        };
        let screen = Screen::for_state(&state);
        assert_eq!(screen.title.as_str(), "Lateral Raise");
        assert_eq!(screen.body.as_str(), "Set 2/3");
        assert_eq!(screen.footer.as_str(), "Rep 5/10");
        assert_eq!(screen.progress, Some(50));
    }

    #[test]
    fn resting_shows_countdown() {
        let state = WorkoutState {
            mode: Mode::Resting,
            plan_configured: true,
            set_number: 2,
            rest_remaining_s: 42,
            ..Default::default()
        };
        let screen = Screen::for_state(&state);
        assert_eq!(screen.title.as_str(), "Rest");
        assert_eq!(screen.body.as_str(), "42 s");
        assert_eq!(screen.footer.as_str(), "Next: set 2");
    }

    #[test]
    fn complete_banner() {
        let state = WorkoutState {
            mode: Mode::Complete,
            plan_configured: true,
            steps: 99,
            ..Default::default()
        };
        let screen = Screen::for_state(&state);
        assert_eq!(screen.title.as_str(), "Workout complete!");
        assert_eq!(screen.footer.as_str(), "Steps: 99");
    }

    #[test]
    fn long_names_are_cut_to_line_width() {
        let mut line = ScreenLine::new();
        push_truncated(&mut line, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(line.len(), LINE_CHARS);
    }

    #[test]
    fn percent_handles_zero_target() {
        assert_eq!(percent(3, 0), 0);
        assert_eq!(percent(12, 10), 100);
    }
}
