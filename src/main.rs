use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::*;
use secrecy::SecretString;

use domain::gateway::zoom::MeetingsClient;
use domain::meeting::{CreateMeetingRequest, ListMeetingsParams, UpdateMeetingRequest};
use domain::topic::{build_topic, parse_timezone, TopicSettings};
use domain::validation::{
    parse_duration, parse_meeting_id, parse_start_time, validate_date_range,
};
use domain::{Error, ErrorKind};
use meeting_auth::credentials::Credentials;
use meeting_auth::error::{config_error, validation_error};
use meeting_auth::http::{HttpClientBuilder, ReqwestTransport};
use meeting_auth::oauth::AuthClient;
use service::config::Config;
use service::logging::Logger;

mod output;

#[derive(Parser)]
#[command(name = "zoom-cli", version)]
#[command(about = "Zoom meeting CLI tool using Server-to-Server OAuth")]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new Zoom meeting
    Create {
        /// Start time (ISO 8601, e.g. 2026-02-10T10:00:00)
        #[arg(long)]
        start: String,
        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,
        /// Meeting participant name (used in topic)
        #[arg(long)]
        with: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List scheduled Zoom meetings
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one meeting
    Get {
        #[arg(allow_hyphen_values = true)]
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update a meeting's topic, start time or duration
    Update {
        #[arg(allow_hyphen_values = true)]
        id: String,
        #[arg(long)]
        topic: Option<String>,
        /// New start time (ISO 8601)
        #[arg(long)]
        start: Option<String>,
        /// New duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a meeting
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
}

/// Clients for one invocation, sharing a single transport.
struct Session {
    credentials: Credentials,
    auth: AuthClient<ReqwestTransport>,
    meetings: MeetingsClient<ReqwestTransport>,
}

impl Session {
    fn connect(config: &Config) -> Result<Self, Error> {
        let credentials = config.credentials()?;

        let builder = HttpClientBuilder::new().with_user_agent(user_agent());
        let builder = match config.http_timeout() {
            Some(timeout) => builder.with_timeout(timeout),
            None => builder.without_timeout(),
        };
        let transport = Arc::new(
            builder
                .build()
                .map_err(|e| config_error("Failed to build the HTTP client.").with_source(e))?,
        );

        Ok(Self {
            credentials,
            auth: AuthClient::new(Arc::clone(&transport), config.oauth_url()?),
            meetings: MeetingsClient::new(transport, config.api_base_url())?,
        })
    }

    async fn token(&self) -> Result<SecretString, Error> {
        self.auth.get_access_token(&self.credentials).await
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file first
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = Logger::init_logger(&cli.config) {
        eprintln!("Failed to start logger: {e}");
    }

    match run(cli).await {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!("Command failed with {}: {:?}", e.kind().as_str(), e);
            eprintln!("Error: {e}");
            ExitCode::from(exit_code(e.kind()))
        }
    }
}

fn user_agent() -> String {
    format!("zoom-cli/{}", env!("CARGO_PKG_VERSION"))
}

/// Input problems exit with 2, failures talking to Zoom with 1.
fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Config | ErrorKind::Validation => 2,
        ErrorKind::Auth | ErrorKind::Api => 1,
    }
}

fn topic_settings(config: &Config) -> TopicSettings {
    TopicSettings {
        timezone: config.timezone().to_string(),
        date_format: config.date_format().to_string(),
        topic_template: config.topic_template().to_string(),
        topic_template_no_with: config.topic_template_no_with().to_string(),
    }
}

/// Run one command and return what it prints on success.
async fn run(cli: Cli) -> Result<String, Error> {
    let Cli { config, command } = cli;

    match command {
        Command::Create {
            start,
            duration,
            with,
            json,
        } => {
            let duration = parse_duration(&duration)?;
            let topic = build_topic(&start, with.as_deref(), &topic_settings(&config))?;

            let session = Session::connect(&config)?;
            let token = session.token().await?;
            let request = CreateMeetingRequest::scheduled(
                topic,
                start,
                duration,
                config.timezone().to_string(),
            );
            let meeting = session.meetings.create(&token, &request).await?;

            if json {
                output::meeting_json(&meeting)
            } else {
                Ok(output::created(&meeting))
            }
        }
        Command::List { from, to, json } => {
            validate_date_range(from.as_deref(), to.as_deref())?;

            let session = Session::connect(&config)?;
            let token = session.token().await?;
            let meetings = session
                .meetings
                .list(&token, &ListMeetingsParams { from, to })
                .await?;

            if json {
                output::meeting_list_json(&meetings)
            } else {
                Ok(output::meeting_list(&meetings))
            }
        }
        Command::Get { id, json } => {
            let meeting_id = parse_meeting_id(&id)?;

            let session = Session::connect(&config)?;
            let token = session.token().await?;
            let meeting = session.meetings.get(&token, meeting_id).await?;

            if json {
                output::meeting_json(&meeting)
            } else {
                Ok(output::meeting(&meeting))
            }
        }
        Command::Update {
            id,
            topic,
            start,
            duration,
            json,
        } => {
            let meeting_id = parse_meeting_id(&id)?;
            let changes = update_request(&config, topic, start, duration)?;

            let session = Session::connect(&config)?;
            let token = session.token().await?;
            session.meetings.update(&token, meeting_id, &changes).await?;
            let meeting = session.meetings.get(&token, meeting_id).await?;

            if json {
                output::meeting_json(&meeting)
            } else {
                Ok(output::updated(&meeting))
            }
        }
        Command::Delete { id } => {
            let meeting_id = parse_meeting_id(&id)?;

            let session = Session::connect(&config)?;
            let token = session.token().await?;
            session.meetings.delete(&token, meeting_id).await?;

            Ok(output::deleted(meeting_id))
        }
    }
}

fn update_request(
    config: &Config,
    topic: Option<String>,
    start: Option<String>,
    duration: Option<String>,
) -> Result<UpdateMeetingRequest, Error> {
    if topic.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return Err(validation_error("--topic must not be empty."));
    }
    let duration = duration.as_deref().map(parse_duration).transpose()?;

    let timezone = match &start {
        Some(start) => {
            parse_start_time(start, parse_timezone(config.timezone())?)?;
            Some(config.timezone().to_string())
        }
        None => None,
    };

    let changes = UpdateMeetingRequest {
        topic,
        start_time: start,
        duration,
        timezone,
    };
    if changes.is_empty() {
        return Err(validation_error(
            "Specify at least one of --topic, --start, or --duration.",
        ));
    }
    Ok(changes)
}
