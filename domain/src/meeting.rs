//! Zoom meeting wire types.

use serde::{Deserialize, Serialize};

/// Zoom meeting type for a scheduled (non-recurring) meeting.
pub const SCHEDULED_MEETING_TYPE: u8 = 2;

const INVITATION_URL_BASE: &str = "https://zoom.us/meetings";

/// Meeting as returned by the Zoom API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: u64,
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: u8,
    /// ISO 8601 start time.
    #[serde(default)]
    pub start_time: String,
    /// Duration in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub join_url: String,
    #[serde(default)]
    pub start_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_password: Option<String>,
}

impl Meeting {
    /// Meeting ID grouped the way Zoom displays it, e.g. `123 4567 8901`.
    pub fn formatted_id(&self) -> String {
        format_meeting_id(self.id)
    }

    /// Invitation page for this meeting.
    pub fn invitation_url(&self) -> String {
        format!("{}/{}/invitations", INVITATION_URL_BASE, self.id)
    }
}

/// Group meeting ID digits as 3-3-3 (9 digits), 3-3-4 (10 digits) or 3-4-4 (11 digits).
/// Other lengths are returned unchanged.
pub fn format_meeting_id(id: u64) -> String {
    let digits = id.to_string();
    let groups: &[usize] = match digits.len() {
        9 => &[3, 3, 3],
        10 => &[3, 3, 4],
        11 => &[3, 4, 4],
        _ => return digits,
    };

    let mut parts = Vec::with_capacity(groups.len());
    let mut start = 0;
    for len in groups {
        parts.push(&digits[start..start + len]);
        start += len;
    }
    parts.join(" ")
}

/// Body of a create meeting request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMeetingRequest {
    pub topic: String,
    #[serde(rename = "type")]
    pub meeting_type: u8,
    pub start_time: String,
    pub duration: u32,
    pub timezone: String,
}

impl CreateMeetingRequest {
    /// A scheduled meeting request.
    pub fn scheduled(topic: String, start_time: String, duration: u32, timezone: String) -> Self {
        Self {
            topic,
            meeting_type: SCHEDULED_MEETING_TYPE,
            start_time,
            duration,
            timezone,
        }
    }
}

/// Partial update of a meeting. Absent fields are left untouched by Zoom.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateMeetingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl UpdateMeetingRequest {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none()
            && self.start_time.is_none()
            && self.duration.is_none()
            && self.timezone.is_none()
    }
}

/// Envelope returned by the list meetings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListMeetingsResponse {
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_records: u32,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

/// Optional date window for listing scheduled meetings (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default)]
pub struct ListMeetingsParams {
    pub from: Option<String>,
    pub to: Option<String>,
}
