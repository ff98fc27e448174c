//! Donation eligibility rules.
//!
//! Pure calendar arithmetic, no store access. The workflow services call
//! [`evaluate`] at approval time; the donor-facing routes use the cooldown
//! helpers to report the exact resume date.

use chrono::{Datelike, Months, NaiveDate};
use thiserror::Error;

use crate::models::Donor;

/// Minimum interval between successive donations, in calendar months.
pub const COOLDOWN_MONTHS: u32 = 3;

/// Minimum donor age in whole years.
pub const MINIMUM_AGE: i32 = 18;

/// Why a donor may not donate right now. Reasons are distinguishable so the
/// workflow can surface a specific message, including the exact resume date
/// for the cooldown.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    #[error("Date of birth missing")]
    MissingBirthDate,
    #[error("Donor must be 18 or older (current age {age})")]
    Underage { age: i32 },
    #[error("Medical data not verified")]
    MedicalUnverified,
    #[error("Can donate again after {}", .resume_date.format("%d/%m/%Y"))]
    CooldownActive { resume_date: NaiveDate },
}

/// Age in whole years at `as_of`, using the has-birthday-passed convention:
/// the year difference, minus one if the birthday has not yet occurred in
/// the reference year.
pub fn age(date_of_birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut years = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    years
}

/// First date a donor may donate again after donating on `last`.
///
/// Adding [`COOLDOWN_MONTHS`] preserves the day-of-month where valid and
/// clamps to the last valid day otherwise (2024-01-31 -> 2024-04-30).
pub fn next_donation_date(last: NaiveDate) -> NaiveDate {
    last.checked_add_months(Months::new(COOLDOWN_MONTHS))
        .unwrap_or(NaiveDate::MAX)
}

/// Whether the cooldown axis permits a donation at `as_of`.
pub fn can_donate_now(last_donation_date: Option<NaiveDate>, as_of: NaiveDate) -> bool {
    match last_donation_date {
        None => true,
        Some(last) => as_of >= next_donation_date(last),
    }
}

/// Full eligibility check for approving a donation: birth date on file,
/// age >= 18, medical verification, and the 3-month cooldown.
pub fn evaluate(donor: &Donor, as_of: NaiveDate) -> Result<(), IneligibleReason> {
    let date_of_birth = donor
        .date_of_birth
        .ok_or(IneligibleReason::MissingBirthDate)?;

    let years = age(date_of_birth, as_of);
    if years < MINIMUM_AGE {
        return Err(IneligibleReason::Underage { age: years });
    }

    if !donor.is_medical_verified {
        return Err(IneligibleReason::MedicalUnverified);
    }

    if let Some(last) = donor.last_donation_date {
        let resume_date = next_donation_date(last);
        if as_of < resume_date {
            return Err(IneligibleReason::CooldownActive { resume_date });
        }
    }

    Ok(())
}
