//! Validation rules for event submissions.
//!
//! Each rule inspects the whole submission and appends whatever errors it
//! finds. Rules never short-circuit each other: a submission with a missing
//! name, inverted prices and an early end date reports all three.

use crate::domain::models::{event::EventSubmission, validation::ValidationError};

pub type Rule = fn(&EventSubmission, &mut Vec<ValidationError>);

/// Rules in evaluation order.
pub const RULES: &[Rule] = &[required_fields, price_range, event_schedule];

pub const NOT_EMPTY: &str = "NotEmpty";
pub const NOT_NULL: &str = "NotNull";
pub const MIN: &str = "Min";
pub const WRONG_PRICES: &str = "wrongPrices";
pub const WRONG_VALUE: &str = "wrongValue";

pub fn validate(submission: &EventSubmission) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for rule in RULES {
        rule(submission, &mut errors);
    }
    errors
}

fn required_fields(submission: &EventSubmission, errors: &mut Vec<ValidationError>) {
    not_empty("name", submission.name.as_deref(), errors);
    not_empty("description", submission.description.as_deref(), errors);

    let instants = [
        ("beginEnrollmentDateTime", submission.begin_enrollment_date_time.is_some()),
        ("closeEnrollmentDateTime", submission.close_enrollment_date_time.is_some()),
        ("beginEventDateTime", submission.begin_event_date_time.is_some()),
        ("endEventDateTime", submission.end_event_date_time.is_some()),
    ];
    for (field, present) in instants {
        if !present {
            errors.push(ValidationError::field(field, NOT_NULL, format!("{} must not be null", field)));
        }
    }

    let amounts = [
        ("basePrice", submission.base_price),
        ("maxPrice", submission.max_price),
        ("limitOfEnrollment", submission.limit_of_enrollment),
    ];
    for (field, value) in amounts {
        if value.is_some_and(|v| v < 0) {
            errors.push(ValidationError::field(field, MIN, format!("{} must be greater than or equal to 0", field)));
        }
    }
}

fn not_empty(field: &str, value: Option<&str>, errors: &mut Vec<ValidationError>) {
    if value.map_or(true, str::is_empty) {
        errors.push(ValidationError::field(field, NOT_EMPTY, format!("{} must not be empty", field)));
    }
}

/// A max price of zero means "no upper bound", so only a non-zero max can be
/// undercut.
fn price_range(submission: &EventSubmission, errors: &mut Vec<ValidationError>) {
    let base = submission.base_price.unwrap_or(0);
    let max = submission.max_price.unwrap_or(0);

    if max != 0 && base > max {
        errors.push(ValidationError::cross_field(
            "basePrice",
            WRONG_PRICES,
            format!("basePrice {} exceeds maxPrice {}", base, max),
        ));
        errors.push(ValidationError::cross_field(
            "maxPrice",
            WRONG_PRICES,
            format!("maxPrice {} is lower than basePrice {}", max, base),
        ));
    }
}

fn event_schedule(submission: &EventSubmission, errors: &mut Vec<ValidationError>) {
    // Missing instants were already reported by `required_fields`.
    let Some(schedule) = submission.schedule() else {
        return;
    };

    if schedule.ends_too_early() {
        errors.push(ValidationError::cross_field(
            "endEventDateTime",
            WRONG_VALUE,
            "endEventDateTime must not be before the event begins or enrollment opens or closes",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::validation::ErrorKind;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 11, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn valid() -> EventSubmission {
        EventSubmission {
            name: Some("Spring".into()),
            description: Some("REST API Development with Spring".into()),
            begin_enrollment_date_time: Some(at(23, 12)),
            close_enrollment_date_time: Some(at(23, 23)),
            begin_event_date_time: Some(at(25, 10)),
            end_event_date_time: Some(at(25, 20)),
            location: Some("Gangnam D2 Startup Factory".into()),
            base_price: Some(100),
            max_price: Some(200),
            limit_of_enrollment: Some(100),
        }
    }

    fn fields(errors: &[ValidationError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn accepts_well_formed_submission() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn accepts_every_price_pair_with_no_maximum_or_base_within_it() {
        for (base, max) in [(0, 0), (100, 0), (10_000, 0), (0, 200), (200, 200), (199, 200)] {
            let mut sub = valid();
            sub.base_price = Some(base);
            sub.max_price = Some(max);
            assert!(validate(&sub).is_empty(), "{base}/{max} should be valid");
        }
    }

    #[test]
    fn equal_instants_are_allowed() {
        let mut sub = valid();
        let t = at(25, 10);
        sub.begin_enrollment_date_time = Some(t);
        sub.close_enrollment_date_time = Some(t);
        sub.begin_event_date_time = Some(t);
        sub.end_event_date_time = Some(t);
        assert!(validate(&sub).is_empty());
    }

    #[test]
    fn empty_submission_reports_each_required_field() {
        let errors = validate(&EventSubmission::default());
        assert_eq!(
            fields(&errors),
            vec![
                "name",
                "description",
                "beginEnrollmentDateTime",
                "closeEnrollmentDateTime",
                "beginEventDateTime",
                "endEventDateTime",
            ]
        );
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Field));
        assert_eq!(errors[0].code, NOT_EMPTY);
        assert_eq!(errors[2].code, NOT_NULL);
    }

    #[test]
    fn blank_name_counts_as_empty() {
        let mut sub = valid();
        sub.name = Some(String::new());
        let errors = validate(&sub);
        assert_eq!(fields(&errors), vec!["name"]);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut sub = valid();
        sub.base_price = Some(-1);
        sub.max_price = Some(0);
        sub.limit_of_enrollment = Some(-5);
        let errors = validate(&sub);
        assert_eq!(fields(&errors), vec!["basePrice", "limitOfEnrollment"]);
        assert!(errors.iter().all(|e| e.code == MIN));
    }

    #[test]
    fn base_above_max_is_attributed_to_both_prices() {
        let mut sub = valid();
        sub.base_price = Some(10_000);
        sub.max_price = Some(200);
        let errors = validate(&sub);
        assert_eq!(fields(&errors), vec!["basePrice", "maxPrice"]);
        assert!(errors.iter().all(|e| e.code == WRONG_PRICES && e.kind == ErrorKind::CrossField));
    }

    #[test]
    fn end_before_any_other_instant_is_reported_once() {
        let cases: [fn(&mut EventSubmission); 3] = [
            |s| s.begin_event_date_time = Some(at(26, 10)),
            |s| s.close_enrollment_date_time = Some(at(26, 10)),
            |s| s.begin_enrollment_date_time = Some(at(26, 10)),
        ];

        for shift in cases {
            let mut sub = valid();
            shift(&mut sub);
            let errors = validate(&sub);
            assert_eq!(fields(&errors), vec!["endEventDateTime"]);
            assert_eq!(errors[0].code, WRONG_VALUE);
        }
    }

    #[test]
    fn schedule_rule_runs_even_when_prices_are_fine_and_when_they_are_not() {
        let mut sub = valid();
        sub.end_event_date_time = Some(at(20, 0));
        assert_eq!(fields(&validate(&sub)), vec!["endEventDateTime"]);

        sub.base_price = Some(10_000);
        assert_eq!(fields(&validate(&sub)), vec!["basePrice", "maxPrice", "endEventDateTime"]);
    }

    #[test]
    fn rules_accumulate_without_short_circuit() {
        let mut sub = valid();
        sub.name = None;
        sub.base_price = Some(500);
        sub.max_price = Some(100);
        sub.end_event_date_time = Some(at(1, 0));
        let errors = validate(&sub);
        assert_eq!(fields(&errors), vec!["name", "basePrice", "maxPrice", "endEventDateTime"]);
    }
}
