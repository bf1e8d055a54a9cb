use serde::Deserialize;

/// Mail-relay settings. The relay counts as configured only when host,
/// port, user and password are all present.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            smtp: SmtpConfig::from_env(),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self {
            smtp: Some(SmtpConfig {
                host: "localhost".into(),
                port: 2525,
                username: "relay@test.local".into(),
                password: "secret".into(),
                recipient: None,
            }),
        }
    }
}

impl SmtpConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let host = var("SMTP_HOST")?;
        let port = match var("SMTP_PORT")?.parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                tracing::warn!(error = %e, "SMTP_PORT is not a valid port number");
                return None;
            }
        };
        let username = var("SMTP_USER")?;
        let password = var("SMTP_PASS")?;
        let recipient = var("RECIPIENT_EMAIL");
        Some(Self {
            host,
            port,
            username,
            password,
            recipient,
        })
    }

    /// Delivery address: the configured recipient, falling back to the
    /// authenticated user.
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }
}
