use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Form;
use serde::{Deserialize, Deserializer};

use crate::auth::CurrentUser;
use crate::services::{parse_id, SaveEventRequest};
use crate::utils::error::AppError;
use crate::utils::response::success;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct EventIdQuery {
    #[serde(rename = "event-id")]
    pub event_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEventForm {
    pub event_title: String,
    pub event_date_time: String,
    pub event_description: String,
    pub event_latitude: String,
    pub event_longitude: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub food_available: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub required_fee: Option<bool>,
    #[serde(rename = "event-id", default)]
    pub event_id: String,
}

impl From<SaveEventForm> for SaveEventRequest {
    fn from(form: SaveEventForm) -> Self {
        SaveEventRequest {
            title: form.event_title,
            date_time: form.event_date_time,
            description: form.event_description,
            latitude: form.event_latitude,
            longitude: form.event_longitude,
            food_available: form.food_available,
            required_fee: form.required_fee,
            event_id: form.event_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub text: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// Accepts browser checkbox values (`on`) as well as plain booleans.
/// A blank value counts as absent.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "true" | "on" | "1" | "yes" => Ok(Some(true)),
        "false" | "off" | "0" | "no" => Ok(Some(false)),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean, got '{other}'"
        ))),
    }
}

pub async fn get_all_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = state.events.get_all_events().await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    query: Result<Query<EventIdQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let event = state.events.get_event(&query.event_id).await?;
    Ok(success(event, "Event retrieved"))
}

pub async fn save_event(
    State(state): State<AppState>,
    user: CurrentUser,
    form: Result<Form<SaveEventForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let event = state.events.save_event(&user.email, form.into()).await?;
    Ok(success(event, "Event saved"))
}

pub async fn add_review(
    State(state): State<AppState>,
    user: CurrentUser,
    form: Result<Form<ReviewForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|e| AppError::ValidationError(e.body_text()))?;
    let event_id = parse_id("eventId", &form.event_id)?;
    let reviews = state
        .events
        .add_review(&user.email, &form.text, event_id)
        .await?;
    Ok(success(reviews, "Review added"))
}
