//! Zoom meetings API client.
//!
//! Each operation issues exactly one request with the caller's bearer token and
//! turns any non-success status into an `Api` error via the shared classifier.

use std::sync::Arc;

use log::*;
use meeting_auth::error::{api_error, config_error, Error};
use meeting_auth::http::{api_status_message, Method, Request, Response, Transport};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use url::Url;

use crate::meeting::{
    CreateMeetingRequest, ListMeetingsParams, ListMeetingsResponse, Meeting, UpdateMeetingRequest,
};

/// Zoom REST API v2 base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.zoom.us/v2";

const CREATE_MEETING: &str = "create meeting";
const LIST_MEETINGS: &str = "list meetings";
const GET_MEETING: &str = "get meeting";
const UPDATE_MEETING: &str = "update meeting";
const DELETE_MEETING: &str = "delete meeting";

/// Zoom meetings API client
pub struct MeetingsClient<T: Transport> {
    transport: Arc<T>,
    base_url: String,
}

impl<T: Transport> MeetingsClient<T> {
    /// Create a new meetings client against the given API base URL.
    pub fn new(transport: Arc<T>, base_url: &str) -> Result<Self, Error> {
        Url::parse(base_url).map_err(|e| {
            warn!("Invalid Zoom API base URL {}: {:?}", base_url, e);
            config_error(format!("Invalid Zoom API base URL: {base_url}")).with_source(e)
        })?;

        Ok(Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a scheduled meeting for the token's user.
    pub async fn create(
        &self,
        token: &SecretString,
        meeting: &CreateMeetingRequest,
    ) -> Result<Meeting, Error> {
        let request = Request::new(Method::Post, self.user_meetings_url()?)
            .bearer_auth(token)
            .json(meeting)
            .map_err(|e| api_error("Failed to encode meeting request.").with_source(e))?;

        debug!("Creating meeting \"{}\"", meeting.topic);
        let response = self.execute(request, CREATE_MEETING).await?;
        let meeting: Meeting = parse(&response, CREATE_MEETING)?;
        info!("Created meeting {}", meeting.id);
        Ok(meeting)
    }

    /// List the token user's scheduled meetings, optionally bounded by `from`/`to` dates.
    ///
    /// Only the first page is returned.
    pub async fn list(
        &self,
        token: &SecretString,
        params: &ListMeetingsParams,
    ) -> Result<Vec<Meeting>, Error> {
        let mut url = self.user_meetings_url()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("type", "scheduled");
            if let Some(from) = params.from.as_deref().filter(|d| !d.is_empty()) {
                query.append_pair("from", from);
            }
            if let Some(to) = params.to.as_deref().filter(|d| !d.is_empty()) {
                query.append_pair("to", to);
            }
        }

        let request = Request::new(Method::Get, url).bearer_auth(token);
        let response = self.execute(request, LIST_MEETINGS).await?;
        let envelope: ListMeetingsResponse = parse(&response, LIST_MEETINGS)?;
        debug!(
            "Listed {} of {} meetings",
            envelope.meetings.len(),
            envelope.total_records
        );
        Ok(envelope.meetings)
    }

    /// Fetch one meeting.
    pub async fn get(&self, token: &SecretString, meeting_id: u64) -> Result<Meeting, Error> {
        let request = Request::new(Method::Get, self.meeting_url(meeting_id)?).bearer_auth(token);
        let response = self.execute(request, GET_MEETING).await?;
        parse(&response, GET_MEETING)
    }

    /// Apply a partial update. Zoom answers with an empty body on success.
    pub async fn update(
        &self,
        token: &SecretString,
        meeting_id: u64,
        changes: &UpdateMeetingRequest,
    ) -> Result<(), Error> {
        let request = Request::new(Method::Patch, self.meeting_url(meeting_id)?)
            .bearer_auth(token)
            .json(changes)
            .map_err(|e| api_error("Failed to encode meeting update.").with_source(e))?;

        self.execute(request, UPDATE_MEETING).await?;
        info!("Updated meeting {}", meeting_id);
        Ok(())
    }

    /// Delete one meeting.
    pub async fn delete(&self, token: &SecretString, meeting_id: u64) -> Result<(), Error> {
        let request =
            Request::new(Method::Delete, self.meeting_url(meeting_id)?).bearer_auth(token);
        self.execute(request, DELETE_MEETING).await?;
        info!("Deleted meeting {}", meeting_id);
        Ok(())
    }

    fn user_meetings_url(&self) -> Result<Url, Error> {
        self.endpoint("users/me/meetings")
    }

    fn meeting_url(&self, meeting_id: u64) -> Result<Url, Error> {
        self.endpoint(&format!("meetings/{meeting_id}"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw)
            .map_err(|e| config_error(format!("Invalid Zoom API URL: {raw}")).with_source(e))
    }

    async fn execute(&self, request: Request, operation: &str) -> Result<Response, Error> {
        let response = self.transport.send(request).await.map_err(|e| {
            warn!("Failed to reach the Zoom API to {}: {:?}", operation, e);
            api_error(format!("Failed to reach the Zoom API to {operation}.")).with_source(e)
        })?;

        if response.is_success() {
            Ok(response)
        } else {
            warn!("Zoom API {} failed with HTTP {}", operation, response.status);
            debug!("Zoom API error body: {}", response.body);
            Err(api_error(api_status_message(response.status, operation)))
        }
    }
}

fn parse<R: DeserializeOwned>(response: &Response, operation: &str) -> Result<R, Error> {
    response.json().map_err(|e| {
        warn!("Failed to parse Zoom API response to {}: {:?}", operation, e);
        api_error(format!("Invalid response from the Zoom API to {operation}.")).with_source(e)
    })
}
