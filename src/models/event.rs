use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// An event published by an organization.
///
/// The date-time is kept as the text the organizer submitted; it is never
/// parsed server side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "datastoreId")]
    pub id: Option<i64>,
    pub organization_name: String,
    pub organization_id: i64,
    pub event_title: String,
    pub event_date_time: String,
    pub event_description: String,
    pub event_latitude: f64,
    pub event_longitude: f64,
    pub food_available: bool,
    pub required_fee: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// The organizer-editable part of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub title: String,
    pub date_time: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Event {
    /// Builds an unsaved event owned by the given organization.
    pub fn new(
        organization_name: impl Into<String>,
        organization_id: i64,
        fields: EventFields,
        food_available: bool,
        required_fee: bool,
    ) -> Self {
        Self {
            id: None,
            organization_name: organization_name.into(),
            organization_id,
            event_title: fields.title,
            event_date_time: fields.date_time,
            event_description: fields.description,
            event_latitude: fields.latitude,
            event_longitude: fields.longitude,
            food_available,
            required_fee,
            reviews: Vec::new(),
        }
    }

    /// Overwrites the editable fields. Ownership and the food/fee flags are
    /// left as they were at creation.
    pub fn apply(&mut self, fields: EventFields) {
        self.event_title = fields.title;
        self.event_date_time = fields.date_time;
        self.event_description = fields.description;
        self.event_latitude = fields.latitude;
        self.event_longitude = fields.longitude;
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }
}

impl Entity for Event {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

/// A review left on an event. Reviews live inside their event and are
/// never edited once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "individualName")]
    pub author_name: String,
    #[serde(rename = "individualEmail")]
    pub author_email: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Review {
    pub fn new(
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            author_name: author_name.into(),
            author_email: author_email.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
