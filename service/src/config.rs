use std::time::Duration;

use clap::builder::TypedValueParser as _;
use clap::Args;
use domain::gateway::zoom::DEFAULT_API_BASE_URL;
use log::LevelFilter;
use meeting_auth::credentials::Credentials;
use meeting_auth::error::{config_error, Error};
use meeting_auth::oauth::DEFAULT_TOKEN_URL;
use secrecy::SecretString;
use url::Url;

const ACCOUNT_ID_KEY: &str = "ZOOM_ACCOUNT_ID";
const CLIENT_ID_KEY: &str = "ZOOM_CLIENT_ID";
const CLIENT_SECRET_KEY: &str = "ZOOM_CLIENT_SECRET";

/// Settings shared by every command. Each flag falls back to the environment
/// variable of the same name, which may come from a `.env` file.
#[derive(Clone, Debug, Args)]
pub struct Config {
    /// Zoom account ID of the Server-to-Server OAuth app.
    #[arg(long, env, global = true)]
    zoom_account_id: Option<String>,

    /// Client ID of the Server-to-Server OAuth app.
    #[arg(long, env, global = true)]
    zoom_client_id: Option<String>,

    /// Client secret of the Server-to-Server OAuth app.
    #[arg(long, env, hide_env_values = true, global = true)]
    zoom_client_secret: Option<String>,

    /// IANA timezone meetings are scheduled and displayed in.
    #[arg(long, env, default_value = "Asia/Tokyo", global = true)]
    zoom_timezone: String,

    /// Date pattern used for `{{date}}` in topics (yyyy, MM, dd, HH, mm).
    #[arg(long, env, default_value = "yyyy/MM/dd HH:mm", global = true)]
    zoom_date_format: String,

    /// Topic template used when `--with` is given.
    #[arg(long, env, default_value = "{{date}} | {{with}}", global = true)]
    zoom_topic_template: String,

    /// Topic template used without `--with`.
    #[arg(long, env, default_value = "{{date}}", global = true)]
    zoom_topic_template_no_with: String,

    /// The OAuth token endpoint.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_TOKEN_URL, global = true)]
    zoom_oauth_url: String,

    /// The base URL of the Zoom REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_API_BASE_URL, global = true)]
    zoom_api_base_url: String,

    /// Timeout in seconds for each HTTP request; 0 disables the timeout
    #[arg(long, env, default_value_t = 30, global = true)]
    http_timeout_secs: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on stderr
    #[arg(
        short,
        long,
        env,
        global = true,
        default_value_t = LevelFilter::Warn,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap_or(LevelFilter::Warn)),
        )]
    pub log_level_filter: LevelFilter,
}

impl Config {
    /// Returns the app credentials, failing with a `Config` error naming the
    /// first missing or empty variable.
    pub fn credentials(&self) -> Result<Credentials, Error> {
        let account_id = require(ACCOUNT_ID_KEY, &self.zoom_account_id)?;
        let client_id = require(CLIENT_ID_KEY, &self.zoom_client_id)?;
        let client_secret = require(CLIENT_SECRET_KEY, &self.zoom_client_secret)?;

        Ok(Credentials::new(
            account_id,
            client_id,
            SecretString::new(client_secret),
        ))
    }

    pub fn timezone(&self) -> &str {
        &self.zoom_timezone
    }

    pub fn date_format(&self) -> &str {
        &self.zoom_date_format
    }

    pub fn topic_template(&self) -> &str {
        &self.zoom_topic_template
    }

    pub fn topic_template_no_with(&self) -> &str {
        &self.zoom_topic_template_no_with
    }

    /// Returns the parsed OAuth token endpoint.
    pub fn oauth_url(&self) -> Result<Url, Error> {
        Url::parse(&self.zoom_oauth_url).map_err(|e| {
            config_error(format!(
                "Invalid ZOOM_OAUTH_URL: {}",
                self.zoom_oauth_url
            ))
            .with_source(e)
        })
    }

    /// Returns the Zoom REST API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.zoom_api_base_url
    }

    /// Returns the per-request timeout, or `None` when disabled.
    pub fn http_timeout(&self) -> Option<Duration> {
        match self.http_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn require(key: &str, value: &Option<String>) -> Result<String, Error> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(config_error(format!(
            "{key} is not set. Check your .env file."
        ))),
    }
}
