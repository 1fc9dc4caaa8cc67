//! Meeting topic templating.
//!
//! Topics are rendered from a template containing `{{date}}` and, when a
//! participant is named, `{{with}}`. The date is formatted with a small pattern
//! language (`yyyy`, `MM`, `dd`, `HH`, `mm`) in the configured timezone.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use meeting_auth::error::{config_error, Error};

use crate::validation::parse_start_time;

/// Settings that shape generated topics.
#[derive(Debug, Clone)]
pub struct TopicSettings {
    /// IANA timezone name, e.g. `Asia/Tokyo`.
    pub timezone: String,
    pub date_format: String,
    /// Used when a participant is given.
    pub topic_template: String,
    /// Used when no participant is given.
    pub topic_template_no_with: String,
}

/// Resolve an IANA timezone name.
pub fn parse_timezone(name: &str) -> Result<Tz, Error> {
    name.parse::<Tz>()
        .map_err(|_| config_error(format!("Invalid timezone: {name}. Check ZOOM_TIMEZONE.")))
}

/// Render `instant` in `timezone` using `pattern`.
///
/// Each token is replaced at its first occurrence only.
pub fn format_date(instant: DateTime<Utc>, pattern: &str, timezone: &str) -> Result<String, Error> {
    let local = instant.with_timezone(&parse_timezone(timezone)?);

    Ok(pattern
        .replacen("yyyy", &format!("{:04}", local.year()), 1)
        .replacen("MM", &format!("{:02}", local.month()), 1)
        .replacen("dd", &format!("{:02}", local.day()), 1)
        .replacen("HH", &format!("{:02}", local.hour()), 1)
        .replacen("mm", &format!("{:02}", local.minute()), 1))
}

/// Build the topic for a meeting starting at `start_time`.
pub fn build_topic(
    start_time: &str,
    with: Option<&str>,
    settings: &TopicSettings,
) -> Result<String, Error> {
    let timezone = parse_timezone(&settings.timezone)?;
    let instant = parse_start_time(start_time, timezone)?;
    let date = format_date(instant, &settings.date_format, &settings.timezone)?;

    let topic = match with.filter(|w| !w.is_empty()) {
        Some(person) => settings
            .topic_template
            .replacen("{{date}}", &date, 1)
            .replacen("{{with}}", person, 1),
        None => settings.topic_template_no_with.replacen("{{date}}", &date, 1),
    };
    Ok(topic)
}
