//! Configuration form parsing.
//!
//! The configuration page posts an `application/x-www-form-urlencoded` body
//! with twelve numeric fields, four per exercise slot:
//!
//! ```text
//! exercise0=0&sets0=3&reps0=10&rest0=60&exercise1=2&sets1=3&...
//! ```
//!
//! The body is decoded with `serde_urlencoded` into [`PlanForm`], so keys
//! must match exactly (`exercise01` is not `exercise1`) and percent-encoding
//! is handled. Parsing is all-or-nothing: any missing, non-numeric, or
//! out-of-range field rejects the whole submission and no partial plan is
//! produced.
//!
//! # Example
//!
//! ```rust
//! use rs_reps::parsing::parse_plan_form;
//! use rs_reps::ExerciseType;
//!
//! let body = "exercise0=0&sets0=3&reps0=10&rest0=60\
//!             &exercise1=2&sets1=3&reps1=12&rest1=90\
//!             &exercise2=4&sets2=2&reps2=8&rest2=60";
//!
//! let plan = parse_plan_form(body).unwrap();
//! assert_eq!(plan[1].exercise_type, ExerciseType::Squat);
//! assert!(parse_plan_form("exercise0=0").is_err());
//! ```

use serde::Deserialize;

use crate::error::{FormError, PlanError};
use crate::workout::{ExerciseSpec, ExerciseType, WorkoutPlan};

/// Exercise type field prefix.
pub const FIELD_EXERCISE: &str = "exercise";
/// Sets field prefix.
pub const FIELD_SETS: &str = "sets";
/// Reps field prefix.
pub const FIELD_REPS: &str = "reps";
/// Rest field prefix.
pub const FIELD_REST: &str = "rest";

/// Raw fields of the configuration form.
///
/// Values stay text until [`parse_plan_form`] checks them, so a missing field
/// and a non-numeric one are reported separately. Unknown keys (such as the
/// submit button) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PlanForm {
    exercise0: Option<String>,
    sets0: Option<String>,
    reps0: Option<String>,
    rest0: Option<String>,
    exercise1: Option<String>,
    sets1: Option<String>,
    reps1: Option<String>,
    rest1: Option<String>,
    exercise2: Option<String>,
    sets2: Option<String>,
    reps2: Option<String>,
    rest2: Option<String>,
}

/// The four raw values of one exercise slot.
struct SlotFields<'a> {
    exercise: Option<&'a str>,
    sets: Option<&'a str>,
    reps: Option<&'a str>,
    rest: Option<&'a str>,
}

impl PlanForm {
    /// Decodes a urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Malformed`] if the body is not a valid form,
    /// e.g. a key appears twice.
    pub fn decode(body: &str) -> Result<Self, FormError> {
        serde_urlencoded::from_str(body).map_err(|e| {
            log::debug!("form decode failed: {}", e);
            FormError::Malformed
        })
    }

    fn slot(&self, slot: usize) -> SlotFields<'_> {
        let (exercise, sets, reps, rest) = match slot {
            0 => (&self.exercise0, &self.sets0, &self.reps0, &self.rest0),
            1 => (&self.exercise1, &self.sets1, &self.reps1, &self.rest1),
            _ => (&self.exercise2, &self.sets2, &self.reps2, &self.rest2),
        };
        SlotFields {
            exercise: exercise.as_deref(),
            sets: sets.as_deref(),
            reps: reps.as_deref(),
            rest: rest.as_deref(),
        }
    }

    /// Validates every slot and builds the plan.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found, scanning slots in order.
    pub fn into_plan(self) -> Result<WorkoutPlan, FormError> {
        let entry0 = self.parse_slot(0)?;
        let entry1 = self.parse_slot(1)?;
        let entry2 = self.parse_slot(2)?;
        Ok(WorkoutPlan::new([entry0, entry1, entry2]))
    }

    fn parse_slot(&self, slot: usize) -> Result<ExerciseSpec, FormError> {
        let fields = self.slot(slot);
        let exercise = number_field(fields.exercise, FIELD_EXERCISE, slot)?;
        let sets = number_field(fields.sets, FIELD_SETS, slot)?;
        let reps = number_field(fields.reps, FIELD_REPS, slot)?;
        let rest = number_field(fields.rest, FIELD_REST, slot)?;

        let plan_err = |error| FormError::Plan { slot, error };

        let exercise_type = u8::try_from(exercise)
            .ok()
            .and_then(ExerciseType::from_index)
            .ok_or(plan_err(PlanError::UnknownExercise(exercise)))?;
        let sets = u8::try_from(sets).map_err(|_| plan_err(PlanError::SetsOutOfRange(sets)))?;
        let reps = u8::try_from(reps).map_err(|_| plan_err(PlanError::RepsOutOfRange(reps)))?;

        ExerciseSpec::new(exercise_type, sets, reps, rest).map_err(plan_err)
    }
}

/// Parse a submitted configuration form into a validated plan.
///
/// # Errors
///
/// Returns [`FormError::Malformed`] if the body cannot be decoded, otherwise
/// the first field error found, scanning slots in order.
pub fn parse_plan_form(body: &str) -> Result<WorkoutPlan, FormError> {
    PlanForm::decode(body)?.into_plan()
}

fn number_field(raw: Option<&str>, field: &'static str, slot: usize) -> Result<u16, FormError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(FormError::MissingField { field, slot });
    }
    raw.parse()
        .map_err(|_| FormError::InvalidNumber { field, slot })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "exercise0=0&sets0=3&reps0=10&rest0=60\
                         &exercise1=1&sets1=4&reps1=5&rest1=120\
                         &exercise2=4&sets2=2&reps2=8&rest2=45";

    // =========================================================================
    // Valid submissions
    // =========================================================================

    #[test]
    fn parse_valid_form() {
        let plan = parse_plan_form(VALID).unwrap();
        assert_eq!(plan[0].exercise_type, ExerciseType::BicepCurl);
        assert_eq!(plan[0].sets, 3);
        assert_eq!(plan[0].reps, 10);
        assert_eq!(plan[0].rest_seconds, 60);
        assert_eq!(plan[1].name.as_str(), "Deadlift");
        assert_eq!(plan[2].exercise_type, ExerciseType::ShoulderPress);
        assert_eq!(plan[2].rest_seconds, 45);
    }

    #[test]
    fn field_order_does_not_matter() {
        let body = "rest2=45&reps2=8&sets2=2&exercise2=4\
                    &rest1=120&reps1=5&sets1=4&exercise1=1\
                    &rest0=60&reps0=10&sets0=3&exercise0=0";
        assert_eq!(parse_plan_form(body), parse_plan_form(VALID));
    }

    #[test]
    fn extra_fields_ignored() {
        let body = format!("{}&submit=Save", VALID);
        assert!(parse_plan_form(&body).is_ok());
    }

    #[test]
    fn percent_encoded_digits_decoded() {
        let body = VALID.replace("sets0=3", "sets0=%33");
        assert_eq!(parse_plan_form(&body).unwrap()[0].sets, 3);
    }

    // =========================================================================
    // Rejections
    // =========================================================================

    #[test]
    fn empty_body_missing_first_field() {
        assert_eq!(
            parse_plan_form(""),
            Err(FormError::MissingField {
                field: "exercise",
                slot: 0
            })
        );
    }

    #[test]
    fn missing_last_field() {
        let body = VALID.replace("&rest2=45", "");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::MissingField {
                field: "rest",
                slot: 2
            })
        );
    }

    #[test]
    fn empty_value_is_missing() {
        let body = VALID.replace("reps1=5", "reps1=");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::MissingField {
                field: "reps",
                slot: 1
            })
        );
    }

    #[test]
    fn non_numeric_value() {
        let body = VALID.replace("sets0=3", "sets0=three");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::InvalidNumber {
                field: "sets",
                slot: 0
            })
        );
    }

    #[test]
    fn negative_value_rejected() {
        let body = VALID.replace("rest0=60", "rest0=-5");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::InvalidNumber {
                field: "rest",
                slot: 0
            })
        );
    }

    #[test]
    fn repeated_key_is_malformed() {
        let body = format!("{}&sets0=5", VALID);
        assert_eq!(parse_plan_form(&body), Err(FormError::Malformed));
    }

    #[test]
    fn unknown_exercise() {
        let body = VALID.replace("exercise2=4", "exercise2=5");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::Plan {
                slot: 2,
                error: PlanError::UnknownExercise(5)
            })
        );
    }

    #[test]
    fn out_of_range_values() {
        let body = VALID.replace("reps0=10", "reps0=0");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::Plan {
                slot: 0,
                error: PlanError::RepsOutOfRange(0)
            })
        );

        let body = VALID.replace("rest2=45", "rest2=301");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::Plan {
                slot: 2,
                error: PlanError::RestOutOfRange(301)
            })
        );
    }

    #[test]
    fn out_of_range_reports_submitted_value() {
        let body = VALID.replace("sets1=4", "sets1=1000");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::Plan {
                slot: 1,
                error: PlanError::SetsOutOfRange(1000)
            })
        );

        let body = VALID.replace("reps2=8", "reps2=256");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::Plan {
                slot: 2,
                error: PlanError::RepsOutOfRange(256)
            })
        );
    }

    #[test]
    fn slot_index_must_match_exactly() {
        // exercise10 is slot 10, not slot 1
        let body = VALID.replace("exercise1=1", "exercise10=1");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::MissingField {
                field: "exercise",
                slot: 1
            })
        );
    }

    #[test]
    fn zero_padded_key_is_not_a_slot() {
        let body = VALID.replace("exercise1=1", "exercise01=2");
        assert_eq!(
            parse_plan_form(&body),
            Err(FormError::MissingField {
                field: "exercise",
                slot: 1
            })
        );
    }
}
