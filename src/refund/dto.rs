use serde::{Deserialize, Serialize};

/// The thirteen form fields of a refund application, as sent by the client.
/// The record lives only for the duration of one request; it is never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefundApplication {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub card_type: String,
    pub card_number: String,
    pub name_on_card: String,
    pub expiration_date: String,
    pub cvv: String,
}

/// Response returned after a successful relay.
#[derive(Debug, Serialize)]
pub struct SendRefundResponse {
    pub success: bool,
    pub message: String,
}
