use std::{env, fmt};

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ContactConfig {
    pub from: String,
    pub to: String,
}

impl Config {
    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let smtp = SmtpConfig {
            host: require("SMTP_HOST")?,
            port: parse_port("SMTP_PORT", &require("SMTP_PORT")?)?,
            username: require("SMTP_USER")?,
            password: require("SMTP_PASS")?,
        };

        let contact = ContactConfig {
            to: require("CONTACT_TO")?,
            from: require("CONTACT_FROM")?,
        };

        let environment = get("NODE_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let port = match get("PORT") {
            Some(raw) => parse_port("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            environment,
            port,
            smtp,
            contact,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_port(key: &'static str, raw: &str) -> Result<u16, ConfigError> {
    raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

/// Reads the configuration from the process environment, picking up a `.env`
/// file in the working directory first if one exists.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    Config::from_lookup(|key| env::var(key).ok())
}
