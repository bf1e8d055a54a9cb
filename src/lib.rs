pub mod app;
pub mod config;
pub mod error;
pub mod form;
pub mod mailer;
pub mod refund;
pub mod sanitize;
pub mod state;
pub mod validate;
