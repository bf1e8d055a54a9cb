use axum::{
    extract::State,
    routing::post,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    error::ApiError,
    refund::{
        dto::{RefundApplication, SendRefundResponse},
        services,
    },
    sanitize,
    state::AppState,
    validate,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/api/send-refund", post(send_refund))
}

#[instrument(skip(state, payload))]
pub async fn send_refund(
    State(state): State<AppState>,
    Json(payload): Json<RefundApplication>,
) -> Result<Json<SendRefundResponse>, ApiError> {
    let (Some(smtp), Some(mailer)) = (state.config.smtp.as_ref(), state.mailer.as_ref()) else {
        error!("mail relay settings are missing");
        return Err(ApiError::ConfigMissing);
    };

    // Never trust the client to have sanitized anything.
    let application = sanitize::application(&payload);

    let now = OffsetDateTime::now_utc();
    if let Some(invalid) = validate::first_error(&application, now.date()) {
        warn!(%invalid, "rejected malformed submission");
        return Err(ApiError::Invalid(invalid));
    }

    let email = services::compose(&application, smtp, now);
    if let Err(e) = mailer.send(email).await {
        error!(error = %e, "relay delivery failed");
        return Err(ApiError::Delivery(e));
    }

    info!(country = %application.country, "refund application relayed");
    Ok(Json(SendRefundResponse {
        success: true,
        message: "Refund application submitted successfully".into(),
    }))
}
