//! Client-side form controller: field state with per-keystroke
//! sanitization, ordered submit-time validation, and outcome mapping for
//! the UI. The HTTP boundary is the injected [`SubmitApi`] collaborator.

use async_trait::async_trait;
use thiserror::Error;
use time::Date;

use crate::refund::dto::RefundApplication;
use crate::sanitize;
use crate::validate;

/// Country options offered by the form, as (code, label) pairs.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("us", "United States"),
    ("uk", "United Kingdom"),
    ("ca", "Canada"),
    ("au", "Australia"),
    ("de", "Germany"),
    ("fr", "France"),
    ("other", "Other"),
];

/// Cards eligible for a refund.
pub const CARD_TYPES: &[&str] = &["visa", "mastercard", "amex"];

const SUCCESS_MESSAGE: &str = "Your refund application has been received. \
     We'll process it within 3-5 business days and send you a confirmation email.";
const REJECTED_FALLBACK: &str =
    "We couldn't process your application. Please check your information and try again.";
const CONNECTION_MESSAGE: &str =
    "Unable to connect to the server. Please check your internet connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FullName,
    Email,
    PhoneNumber,
    DateOfBirth,
    Address,
    City,
    PostalCode,
    Country,
    CardType,
    CardNumber,
    NameOnCard,
    ExpirationDate,
    Cvv,
}

/// What the submission endpoint answered, as seen by the form.
#[derive(Debug, Clone)]
pub enum ApiReply {
    Accepted { message: String },
    Rejected { error: Option<String> },
}

/// The endpoint could not be reached at all; no response was received.
#[derive(Debug, Clone, Error)]
#[error("could not reach the submission endpoint")]
pub struct ConnectionError;

#[async_trait]
pub trait SubmitApi: Send + Sync {
    async fn submit(&self, application: &RefundApplication) -> Result<ApiReply, ConnectionError>;
}

/// Feedback to surface to the user after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Accepted { message: String },
    Rejected { message: String },
    ConnectionFailed { message: String },
}

#[derive(Debug, Default)]
pub struct RefundForm {
    values: RefundApplication,
    is_submitting: bool,
}

impl RefundForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one input event. The raw value is sanitized for the field's
    /// class before it reaches the state; select-backed fields (country,
    /// card type) ignore values outside their fixed option lists.
    pub fn input(&mut self, field: FormField, raw: &str) {
        let value = match field {
            FormField::Email => sanitize::email(raw),
            FormField::PhoneNumber => sanitize::phone(raw),
            FormField::CardNumber => sanitize::card_number(raw),
            FormField::Cvv => sanitize::cvv(raw),
            FormField::ExpirationDate => {
                let mut value = sanitize::expiration(raw);
                // Formatting aid: MM -> MM/
                if value.len() == 2 && !value.contains('/') {
                    value.push('/');
                }
                value
            }
            // Native date picker; validated on submit.
            FormField::DateOfBirth => raw.to_string(),
            FormField::Country => {
                if !COUNTRIES.iter().any(|(code, _)| *code == raw) {
                    return;
                }
                raw.to_string()
            }
            FormField::CardType => {
                if !CARD_TYPES.contains(&raw) {
                    return;
                }
                raw.to_string()
            }
            FormField::FullName
            | FormField::Address
            | FormField::City
            | FormField::PostalCode
            | FormField::NameOnCard => sanitize::text(raw),
        };
        *self.slot(field) = value;
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.values.full_name,
            FormField::Email => &self.values.email,
            FormField::PhoneNumber => &self.values.phone_number,
            FormField::DateOfBirth => &self.values.date_of_birth,
            FormField::Address => &self.values.address,
            FormField::City => &self.values.city,
            FormField::PostalCode => &self.values.postal_code,
            FormField::Country => &self.values.country,
            FormField::CardType => &self.values.card_type,
            FormField::CardNumber => &self.values.card_number,
            FormField::NameOnCard => &self.values.name_on_card,
            FormField::ExpirationDate => &self.values.expiration_date,
            FormField::Cvv => &self.values.cvv,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::FullName => &mut self.values.full_name,
            FormField::Email => &mut self.values.email,
            FormField::PhoneNumber => &mut self.values.phone_number,
            FormField::DateOfBirth => &mut self.values.date_of_birth,
            FormField::Address => &mut self.values.address,
            FormField::City => &mut self.values.city,
            FormField::PostalCode => &mut self.values.postal_code,
            FormField::Country => &mut self.values.country,
            FormField::CardType => &mut self.values.card_type,
            FormField::CardNumber => &mut self.values.card_number,
            FormField::NameOnCard => &mut self.values.name_on_card,
            FormField::ExpirationDate => &mut self.values.expiration_date,
            FormField::Cvv => &mut self.values.cvv,
        }
    }

    /// Whether a submission is in flight; drives the submit control's
    /// disabled state.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Validate in the fixed order and, if everything passes, send the
    /// field set through the API. No request is made for an invalid form.
    /// The in-flight flag is cleared on every path out of the attempt.
    pub async fn submit(&mut self, api: &dyn SubmitApi, today: Date) -> Feedback {
        if let Some(invalid) = validate::first_error(&self.values, today) {
            return Feedback::Rejected {
                message: invalid.to_string(),
            };
        }

        self.is_submitting = true;
        let outcome = api.submit(&self.values).await;
        self.is_submitting = false;

        match outcome {
            Ok(ApiReply::Accepted { .. }) => {
                self.values = RefundApplication::default();
                Feedback::Accepted {
                    message: SUCCESS_MESSAGE.into(),
                }
            }
            Ok(ApiReply::Rejected { error }) => Feedback::Rejected {
                message: error.unwrap_or_else(|| REJECTED_FALLBACK.into()),
            },
            Err(ConnectionError) => Feedback::ConnectionFailed {
                message: CONNECTION_MESSAGE.into(),
            },
        }
    }
}
