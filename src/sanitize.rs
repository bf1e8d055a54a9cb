//! Per-field-class input sanitizers, shared by the form controller and the
//! submission handler so both boundaries apply identical rules.

use lazy_static::lazy_static;
use regex::Regex;

use crate::refund::dto::RefundApplication;

lazy_static! {
    static ref ANGLE_BRACKETS: Regex = Regex::new(r"[<>]").unwrap();
    static ref TEXT_DISALLOWED: Regex = Regex::new(r"[^A-Za-z0-9_\s@.,\-()]").unwrap();
    static ref PHONE_DISALLOWED: Regex = Regex::new(r"[^0-9\s\-()]").unwrap();
    static ref CARD_DISALLOWED: Regex = Regex::new(r"[^0-9\s]").unwrap();
    static ref CVV_DISALLOWED: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref EXPIRATION_DISALLOWED: Regex = Regex::new(r"[^0-9/]").unwrap();
}

/// Free text: angle brackets removed, restricted to word characters,
/// whitespace and `@ . , - ( )`, then trimmed. Trimming last keeps the
/// function idempotent when stripping exposes trailing whitespace.
pub fn text(input: &str) -> String {
    let stripped = ANGLE_BRACKETS.replace_all(input, "");
    TEXT_DISALLOWED.replace_all(&stripped, "").trim().to_string()
}

/// Email: lowercased, angle brackets removed, trimmed. No further charset
/// restriction; shape is checked at validation time.
pub fn email(input: &str) -> String {
    ANGLE_BRACKETS
        .replace_all(&input.to_lowercase(), "")
        .trim()
        .to_string()
}

pub fn phone(input: &str) -> String {
    PHONE_DISALLOWED.replace_all(input, "").into_owned()
}

pub fn card_number(input: &str) -> String {
    CARD_DISALLOWED.replace_all(input, "").into_owned()
}

pub fn cvv(input: &str) -> String {
    CVV_DISALLOWED.replace_all(input, "").into_owned()
}

pub fn expiration(input: &str) -> String {
    EXPIRATION_DISALLOWED.replace_all(input, "").into_owned()
}

/// Run every field of an application through its field-class sanitizer.
/// The handler applies this on receipt; it never assumes the client ran.
pub fn application(raw: &RefundApplication) -> RefundApplication {
    RefundApplication {
        full_name: text(&raw.full_name),
        email: email(&raw.email),
        phone_number: phone(&raw.phone_number),
        date_of_birth: text(&raw.date_of_birth),
        address: text(&raw.address),
        city: text(&raw.city),
        postal_code: text(&raw.postal_code),
        country: text(&raw.country),
        card_type: text(&raw.card_type),
        card_number: card_number(&raw.card_number),
        name_on_card: text(&raw.name_on_card),
        expiration_date: expiration(&raw.expiration_date),
        cvv: cvv(&raw.cvv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_strips_markup_and_specials() {
        assert_eq!(text("<script>x</script>"), "scriptxscript");
        assert_eq!(text("John $#%Doe!"), "John Doe");
        assert_eq!(text("  42 Main St.  "), "42 Main St.");
    }

    #[test]
    fn text_keeps_allowed_punctuation() {
        assert_eq!(text("a@b.c, (x) - y_z"), "a@b.c, (x) - y_z");
    }

    #[test]
    fn email_is_trimmed_lowercased_and_bracket_free() {
        assert_eq!(email("  John.Doe+tag@Example.COM  "), "john.doe+tag@example.com");
        assert_eq!(email("<jane@example.com>"), "jane@example.com");
    }

    #[test]
    fn phone_keeps_digits_and_separators() {
        assert_eq!(phone("(555) 123-4567 ext9"), "(555) 123-4567 9");
    }

    #[test]
    fn card_number_keeps_digits_and_spaces() {
        assert_eq!(card_number("4111-1111 2222abc"), "41111111 2222");
    }

    #[test]
    fn cvv_keeps_only_digits() {
        assert_eq!(cvv("12a3"), "123");
    }

    #[test]
    fn expiration_keeps_digits_and_slash() {
        assert_eq!(expiration("12/30x"), "12/30");
    }

    #[test]
    fn text_trims_after_stripping() {
        assert_eq!(text("Jane !"), "Jane");
        assert_eq!(email(" jane@example.com <"), "jane@example.com");
    }

    #[test]
    fn sanitizers_are_idempotent() {
        for gnarly in ["  <b>Jane*&^ (Doe)</b> 12/34 ", "Jane !", " a@B.c <"] {
            for f in [text, email, phone, card_number, cvv, expiration] {
                let once = f(gnarly);
                assert_eq!(f(&once), once);
            }
        }
    }

    #[test]
    fn application_sanitizes_every_field() {
        let raw = RefundApplication {
            full_name: "<i>Jane</i>".into(),
            email: " JANE@EXAMPLE.COM ".into(),
            phone_number: "555#123".into(),
            card_number: "4111x1111".into(),
            cvv: "1a2b3".into(),
            expiration_date: "12-30".into(),
            ..RefundApplication::default()
        };
        let clean = application(&raw);
        assert_eq!(clean.full_name, "iJanei");
        assert_eq!(clean.email, "jane@example.com");
        assert_eq!(clean.phone_number, "555123");
        assert_eq!(clean.card_number, "41111111");
        assert_eq!(clean.cvv, "123");
        assert_eq!(clean.expiration_date, "1230");
    }
}
