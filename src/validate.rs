//! Submit-time field validation. Checks run in a fixed order and the first
//! failure wins; messages are the user-facing ones shown by the form.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use time::macros::format_description;
use time::Date;

use crate::refund::dto::RefundApplication;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref EXPIRATION_RE: Regex = Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("You must be at least 18 years old to submit a refund application.")]
    AgeRequirement,
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Please enter a valid phone number (10-15 digits).")]
    PhoneNumber,
    #[error("Please enter a valid card number (13-19 digits).")]
    CardNumber,
    #[error("Please enter a valid expiration date (MM/YY) that hasn't expired.")]
    ExpirationDate,
    #[error("Please enter a valid CVV (3-4 digits).")]
    Cvv,
}

/// Age as of `today`, from a `YYYY-MM-DD` date of birth. An absent or
/// unparseable date fails the check.
pub fn is_adult(date_of_birth: &str, today: Date) -> bool {
    let format = format_description!("[year]-[month]-[day]");
    let Ok(birth) = Date::parse(date_of_birth, format) else {
        return false;
    };
    let mut age = today.year() - birth.year();
    if (today.month() as u8, today.day()) < (birth.month() as u8, birth.day()) {
        age -= 1;
    }
    age >= 18
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(|c| c.is_ascii_digit()).count()
}

pub fn is_valid_phone(phone: &str) -> bool {
    (10..=15).contains(&digit_count(phone))
}

pub fn is_valid_card_number(card: &str) -> bool {
    (13..=19).contains(&digit_count(card))
}

/// `MM/YY`, month 01-12, and the month (year 2000+YY) strictly after the
/// current year-month. A card expiring this month is already rejected.
pub fn is_valid_expiration(expiration: &str, today: Date) -> bool {
    let Some(caps) = EXPIRATION_RE.captures(expiration) else {
        return false;
    };
    let month = caps[1].parse::<u8>().unwrap_or(0);
    let year = 2000 + caps[2].parse::<i32>().unwrap_or(0);
    (year, month) > (today.year(), today.month() as u8)
}

pub fn is_valid_cvv(cvv: &str) -> bool {
    (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit())
}

/// The fixed evaluation order; only one error is ever surfaced at a time.
pub fn first_error(application: &RefundApplication, today: Date) -> Option<ValidationError> {
    if !is_adult(&application.date_of_birth, today) {
        return Some(ValidationError::AgeRequirement);
    }
    if !is_valid_email(&application.email) {
        return Some(ValidationError::Email);
    }
    if !is_valid_phone(&application.phone_number) {
        return Some(ValidationError::PhoneNumber);
    }
    if !is_valid_card_number(&application.card_number) {
        return Some(ValidationError::CardNumber);
    }
    if !is_valid_expiration(&application.expiration_date, today) {
        return Some(ValidationError::ExpirationDate);
    }
    if !is_valid_cvv(&application.cvv) {
        return Some(ValidationError::Cvv);
    }
    None
}
