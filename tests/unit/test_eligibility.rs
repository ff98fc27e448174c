//! Unit tests for the eligibility rules.

use blood_donation_api::models::Donor;
use blood_donation_api::services::eligibility::{
    age, can_donate_now, evaluate, next_donation_date, IneligibleReason,
};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn donor(
    date_of_birth: Option<NaiveDate>,
    verified: bool,
    last_donation_date: Option<NaiveDate>,
) -> Donor {
    Donor {
        id: 1,
        user_id: 1,
        blood_type_id: Some(1),
        date_of_birth,
        last_donation_date,
        is_medical_verified: verified,
        medical_verified_by: None,
        medical_verified_date: None,
        health_status: None,
    }
}

#[test]
fn age_counts_whole_years_with_birthday_adjustment() {
    let dob = date(1990, 6, 15);
    assert_eq!(age(dob, date(2020, 6, 14)), 29);
    assert_eq!(age(dob, date(2020, 6, 15)), 30);
    assert_eq!(age(dob, date(2020, 6, 16)), 30);
}

#[test]
fn eighteenth_birthday_is_eligible_on_the_age_axis() {
    // Exactly 18 today: eligible. One day short: not.
    let dob = date(2007, 3, 10);
    assert!(evaluate(&donor(Some(dob), true, None), date(2025, 3, 10)).is_ok());
    assert_eq!(
        evaluate(&donor(Some(dob), true, None), date(2025, 3, 9)),
        Err(IneligibleReason::Underage { age: 17 })
    );
}

#[test]
fn missing_birth_date_is_its_own_reason() {
    assert_eq!(
        evaluate(&donor(None, true, None), date(2025, 1, 1)),
        Err(IneligibleReason::MissingBirthDate)
    );
}

#[test]
fn unverified_donor_is_ineligible() {
    assert_eq!(
        evaluate(&donor(Some(date(1990, 1, 1)), false, None), date(2025, 1, 1)),
        Err(IneligibleReason::MedicalUnverified)
    );
}

#[test]
fn cooldown_adds_three_calendar_months() {
    assert_eq!(next_donation_date(date(2025, 1, 1)), date(2025, 4, 1));
    assert_eq!(next_donation_date(date(2024, 11, 30)), date(2025, 2, 28));
}

#[test]
fn cooldown_clamps_to_month_end() {
    // 2024-01-31 + 3 months clamps to the last valid day of April.
    assert_eq!(next_donation_date(date(2024, 1, 31)), date(2024, 4, 30));
}

#[test]
fn cooldown_boundary_is_inclusive_of_the_resume_date() {
    let last = date(2024, 1, 31);
    assert!(!can_donate_now(Some(last), date(2024, 4, 29)));
    assert!(can_donate_now(Some(last), date(2024, 4, 30)));
    assert!(can_donate_now(Some(last), date(2024, 5, 1)));
}

#[test]
fn no_prior_donation_passes_the_cooldown() {
    assert!(can_donate_now(None, date(2025, 1, 1)));
}

#[test]
fn cooldown_reason_carries_the_exact_resume_date() {
    let result = evaluate(
        &donor(Some(date(1990, 1, 1)), true, Some(date(2025, 1, 1))),
        date(2025, 2, 1),
    );
    assert_eq!(
        result,
        Err(IneligibleReason::CooldownActive {
            resume_date: date(2025, 4, 1)
        })
    );
}

#[test]
fn all_gates_passing_yields_eligible() {
    let result = evaluate(
        &donor(Some(date(1990, 1, 1)), true, Some(date(2024, 9, 1))),
        date(2025, 1, 1),
    );
    assert!(result.is_ok());
}
