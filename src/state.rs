use std::sync::Arc;

use crate::config::AppConfig;
use crate::mailer::{Mailer, SmtpMailer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());

        let mailer = match config.smtp.as_ref() {
            Some(smtp) => {
                let mailer = SmtpMailer::new(smtp)?;
                tracing::info!(host = %smtp.host, port = smtp.port, "mail relay configured");
                Some(Arc::new(mailer) as Arc<dyn Mailer>)
            }
            None => {
                tracing::warn!("mail relay not configured; submissions will be rejected");
                None
            }
        };

        Ok(Self { config, mailer })
    }

    #[cfg(test)]
    pub fn fake(mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            config: Arc::new(AppConfig::fake()),
            mailer,
        }
    }
}
