//
//  refdesk
//  api/resources/appointments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Appointment facade: `/appointments/`.
//!
//! Appointments assign a referee to a match at a venue. This is the richest
//! facade: listings carry pagination metadata, and create/update payloads are
//! reshaped into the exact field set the service expects.
//!
//! # Payload Rules
//!
//! | Field | Create | Update |
//! |-------|--------|--------|
//! | `appointment_id`, `referee`, `venue`, `match` | passed through | passed through |
//! | `appointment_date` | passed through | passed through |
//! | `appointment_time` | [`format_appointment_time`] | [`format_appointment_time`] |
//! | `distance` | defaults to `0` | defaults to `0` |
//! | `status` | always `upcoming` | caller's value, if any |
//! | `decline_reason` | dropped | caller's value, if any |
//!
//! Any other field is dropped.
//!
//! # Example
//!
//! ```rust,no_run
//! use refdesk::api::ApiClient;
//! use refdesk::api::resources::{AppointmentFields, ListParams};
//! use serde_json::json;
//!
//! # async fn example(client: &ApiClient) -> Result<(), refdesk::api::ApiError> {
//! let page = client.appointments().list(&ListParams::page(2)).await?;
//! if let Some(meta) = &page.meta {
//!     println!("page {} of {}", meta.current_page, meta.total_pages);
//! }
//!
//! let fields: AppointmentFields = serde_json::from_value(json!({
//!     "referee": 4, "venue": 2, "match": 31,
//!     "appointment_date": "2026-03-14", "appointment_time": "15",
//! })).expect("valid fields");
//! client.appointments().create(fields).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{discard_body, fetch_body, item_path};
use crate::api::client::{ApiClient, ApiRequest};
use crate::api::common::{text_of, ApiError, Filters, ListResult, DEFAULT_PAGE_SIZE};

const COLLECTION: &str = "/appointments/";

/// Server-side ordering requested by default: newest date first, then earliest time.
pub const DEFAULT_ORDERING: &str = "-appointment_date,appointment_time";

/// Status given to every newly created appointment.
pub const INITIAL_STATUS: &str = "upcoming";

/// Time sent when the caller supplies none.
pub const DEFAULT_APPOINTMENT_TIME: &str = "00:00:00";

/// Query parameters for an appointment listing.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub page: u32,
    pub page_size: u32,
    pub ordering: String,
    pub filters: Filters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            ordering: DEFAULT_ORDERING.to_string(),
            filters: Filters::new(),
        }
    }
}

impl ListParams {
    /// Default parameters for the given page.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = ordering.into();
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

/// Caller-supplied appointment fields.
///
/// Identifiers are kept as raw JSON values so numeric and string ids pass
/// through untouched. Unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppointmentFields {
    #[serde(default)]
    pub appointment_id: Option<Value>,
    #[serde(default)]
    pub referee: Option<Value>,
    #[serde(default)]
    pub venue: Option<Value>,
    #[serde(default, rename = "match")]
    pub match_id: Option<Value>,
    #[serde(default)]
    pub appointment_date: Option<Value>,
    #[serde(default)]
    pub appointment_time: Option<Value>,
    #[serde(default)]
    pub distance: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub decline_reason: Option<String>,
}

/// The payload actually submitted to the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppointmentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referee: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Value>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<Value>,
    pub appointment_time: String,
    pub distance: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
}

impl AppointmentPayload {
    fn shaped(fields: AppointmentFields) -> Self {
        Self {
            appointment_time: format_appointment_time(fields.appointment_time.as_ref()),
            distance: fields.distance.unwrap_or_else(|| json!(0)),
            appointment_id: fields.appointment_id,
            referee: fields.referee,
            venue: fields.venue,
            match_id: fields.match_id,
            appointment_date: fields.appointment_date,
            status: None,
            decline_reason: None,
        }
    }

    /// Payload for a new appointment; the status is always [`INITIAL_STATUS`].
    pub fn for_create(fields: AppointmentFields) -> Self {
        Self {
            status: Some(INITIAL_STATUS.to_string()),
            ..Self::shaped(fields)
        }
    }

    /// Payload for an update; status and decline reason are passed through.
    pub fn for_update(fields: AppointmentFields) -> Self {
        let status = fields.status.clone();
        let decline_reason = fields.decline_reason.clone();
        Self {
            status,
            decline_reason,
            ..Self::shaped(fields)
        }
    }

    pub fn to_json(&self) -> Result<Value, ApiError> {
        serde_json::to_value(self).map_err(|e| ApiError::decode(e.to_string()))
    }
}

/// Normalizes an appointment time for submission.
///
/// Absent, `null` or blank becomes `"00:00:00"`. A value containing a colon
/// (`HH:MM` or `HH:MM:SS`) is kept as is. An hour on its own gets `":00"`
/// appended.
///
/// ```rust
/// use refdesk::api::resources::appointments::format_appointment_time;
/// use serde_json::json;
///
/// assert_eq!(format_appointment_time(None), "00:00:00");
/// assert_eq!(format_appointment_time(Some(&json!("9"))), "9:00");
/// assert_eq!(format_appointment_time(Some(&json!("09:30"))), "09:30");
/// assert_eq!(format_appointment_time(Some(&json!(14))), "14:00");
/// ```
pub fn format_appointment_time(time: Option<&Value>) -> String {
    let text = match time {
        None | Some(Value::Null) => return DEFAULT_APPOINTMENT_TIME.to_string(),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return DEFAULT_APPOINTMENT_TIME.to_string()
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    if text.contains(':') {
        text
    } else {
        format!("{text}:00")
    }
}

/// Message for a rejected creation.
///
/// Priority: string body, `error`, `detail`, then the per-field validation
/// messages as `field: message` joined by `; `.
fn creation_message(body: &Value) -> Option<String> {
    match body {
        Value::String(_) => text_of(body),
        Value::Object(map) => ["error", "detail"]
            .iter()
            .find_map(|field| map.get(*field).and_then(text_of))
            .or_else(|| field_errors(map)),
        _ => None,
    }
}

fn field_errors(map: &Map<String, Value>) -> Option<String> {
    let messages: Vec<String> = map
        .iter()
        .filter_map(|(field, value)| text_of(value).map(|text| format!("{field}: {text}")))
        .collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

pub struct Appointments<'a> {
    client: &'a ApiClient,
}

impl<'a> Appointments<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists one page of appointments with pagination metadata.
    ///
    /// The server's ordering is trusted; nothing is re-sorted locally.
    pub async fn list(&self, params: &ListParams) -> Result<ListResult, ApiError> {
        let request = ApiRequest::get(COLLECTION)
            .query("page", params.page)
            .query("page_size", params.page_size)
            .query("ordering", params.ordering.as_str())
            .filters(&params.filters);

        self.client
            .request_list(request)
            .await
            .map(|envelope| envelope.into_paged(params.page, params.page_size))
            .map_err(|e| e.with_fallback("Failed to fetch appointments"))
    }

    pub async fn get(&self, id: &str) -> Result<Value, ApiError> {
        fetch_body(
            self.client,
            ApiRequest::get(item_path(COLLECTION, id)),
            "Failed to fetch appointment",
        )
        .await
    }

    pub async fn create(&self, fields: AppointmentFields) -> Result<Value, ApiError> {
        let payload = AppointmentPayload::for_create(fields).to_json()?;
        self.client
            .request(ApiRequest::post(COLLECTION).json(payload))
            .await
            .map(|response| response.body)
            .map_err(|e| {
                let message = e
                    .body()
                    .and_then(creation_message)
                    .unwrap_or_else(|| "Failed to create appointment".to_string());
                e.with_message(message)
            })
    }

    pub async fn update(&self, id: &str, fields: AppointmentFields) -> Result<Value, ApiError> {
        let payload = AppointmentPayload::for_update(fields).to_json()?;
        fetch_body(
            self.client,
            ApiRequest::put(item_path(COLLECTION, id)).json(payload),
            "Failed to update appointment",
        )
        .await
    }

    /// Deletes an appointment. The response body is discarded.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        discard_body(
            self.client,
            ApiRequest::delete(item_path(COLLECTION, id)),
            "Failed to delete appointment",
        )
        .await
    }
}
