//! Rendering of command results for stdout.

use domain::meeting::Meeting;
use domain::Error;
use meeting_auth::error::api_error;
use serde::Serialize;

/// The JSON view of a meeting.
#[derive(Debug, Serialize)]
struct MeetingSummary<'a> {
    id: u64,
    topic: &'a str,
    start_time: &'a str,
    duration: u32,
    join_url: &'a str,
    password: Option<&'a str>,
    meeting_id_formatted: String,
    invitation_url: String,
}

impl<'a> From<&'a Meeting> for MeetingSummary<'a> {
    fn from(meeting: &'a Meeting) -> Self {
        Self {
            id: meeting.id,
            topic: &meeting.topic,
            start_time: &meeting.start_time,
            duration: meeting.duration,
            join_url: &meeting.join_url,
            password: meeting.password.as_deref(),
            meeting_id_formatted: meeting.formatted_id(),
            invitation_url: meeting.invitation_url(),
        }
    }
}

pub fn created(meeting: &Meeting) -> String {
    format!("Meeting created!\n{}", details(meeting))
}

pub fn updated(meeting: &Meeting) -> String {
    format!("Meeting updated!\n{}", details(meeting))
}

/// Details block used by `get`, led by the meeting ID.
pub fn meeting(meeting: &Meeting) -> String {
    format!("  ID:       {}\n{}", meeting.id, details(meeting))
}

pub fn meeting_list(meetings: &[Meeting]) -> String {
    if meetings.is_empty() {
        return "No scheduled meetings found.\n".to_string();
    }

    meetings
        .iter()
        .map(|m| {
            format!(
                "[{}] {}\n  Start:    {}\n  Duration: {} min\n  Join URL: {}\n\n",
                m.id, m.topic, m.start_time, m.duration, m.join_url
            )
        })
        .collect()
}

pub fn deleted(meeting_id: u64) -> String {
    format!("Meeting {meeting_id} deleted.\n")
}

pub fn meeting_json(meeting: &Meeting) -> Result<String, Error> {
    to_json(&MeetingSummary::from(meeting))
}

pub fn meeting_list_json(meetings: &[Meeting]) -> Result<String, Error> {
    let summaries: Vec<MeetingSummary> = meetings.iter().map(MeetingSummary::from).collect();
    to_json(&summaries)
}

fn details(meeting: &Meeting) -> String {
    let mut block = format!(
        "  Topic:    {}\n  Start:    {}\n  Duration: {} min\n  Join URL: {}\n",
        meeting.topic, meeting.start_time, meeting.duration, meeting.join_url
    );
    if let Some(password) = &meeting.password {
        block.push_str(&format!("  Passcode: {password}\n"));
    }
    block
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, Error> {
    serde_json::to_string_pretty(value)
        .map(|json| json + "\n")
        .map_err(|e| api_error("Failed to render JSON output.").with_source(e))
}
