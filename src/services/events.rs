//! Event listing, create-or-update, and review workflow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{parse_coordinate, parse_id, ServiceError};
use crate::models::{Event, EventFields, Review};
use crate::store::{
    EmailLookup, EventRepository, IndividualRepository, OrganizationRepository, Repository, Stores,
};

/// Raw save-event input as submitted by an organizer.
#[derive(Debug, Clone, Default)]
pub struct SaveEventRequest {
    pub title: String,
    pub date_time: String,
    pub description: String,
    pub latitude: String,
    pub longitude: String,
    pub food_available: Option<bool>,
    pub required_fee: Option<bool>,
    /// Empty to create a new event.
    pub event_id: String,
}

/// Outcome of resolving the submitted event id against the store.
#[derive(Debug)]
pub enum SaveDecision {
    Create(EventFields),
    Update(Event, EventFields),
}

pub struct EventService {
    events: Arc<dyn EventRepository>,
    organizations: Arc<dyn OrganizationRepository>,
    individuals: Arc<dyn IndividualRepository>,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        organizations: Arc<dyn OrganizationRepository>,
        individuals: Arc<dyn IndividualRepository>,
    ) -> Self {
        Self {
            events,
            organizations,
            individuals,
        }
    }

    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(
            stores.events.clone(),
            stores.organizations.clone(),
            stores.individuals.clone(),
        )
    }

    pub async fn get_all_events(&self) -> Result<Vec<Event>, ServiceError> {
        let events = self.events.find_all().await?;
        debug!(count = events.len(), "Listed events");
        Ok(events)
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Event, ServiceError> {
        let id = parse_id("event-id", event_id)?;
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Event {id} was not found")))
    }

    /// Creates a new event for the requester's organization, or updates the
    /// event named by `request.event_id` when it exists.
    ///
    /// All input is validated before anything is written.
    pub async fn save_event(
        &self,
        requester_email: &str,
        request: SaveEventRequest,
    ) -> Result<Event, ServiceError> {
        let fields = EventFields {
            latitude: parse_coordinate("eventLatitude", &request.latitude)?,
            longitude: parse_coordinate("eventLongitude", &request.longitude)?,
            title: request.title,
            date_time: request.date_time,
            description: request.description,
        };
        let event_id = match request.event_id.trim() {
            "" => None,
            raw => Some(parse_id("event-id", raw)?),
        };

        let mut organization = self
            .organizations
            .find_first_by_email(requester_email)
            .await?
            .ok_or_else(|| {
                warn!(email = %requester_email, "Save event rejected: no organization");
                ServiceError::Unauthorized(format!(
                    "No organization is registered for {requester_email}"
                ))
            })?;

        match self.decide(event_id, fields).await? {
            SaveDecision::Update(mut event, fields) => {
                event.apply(fields);
                let event = self.events.save(event).await?;
                info!(event_id = ?event.id, "Updated event");
                Ok(event)
            }
            SaveDecision::Create(fields) => {
                let organization_id = organization.id.ok_or_else(|| {
                    ServiceError::NotFound(format!(
                        "Organization {} has no identifier",
                        organization.name
                    ))
                })?;
                let event = Event::new(
                    organization.name.clone(),
                    organization_id,
                    fields,
                    request.food_available.unwrap_or(false),
                    request.required_fee.unwrap_or(false),
                );
                let event = self.events.save(event).await?;
                if let Some(id) = event.id {
                    organization.add_event(id);
                }
                self.organizations.save(organization).await?;
                info!(event_id = ?event.id, organization_id, "Created event");
                Ok(event)
            }
        }
    }

    /// An id that matches no stored event falls through to creation.
    async fn decide(
        &self,
        event_id: Option<i64>,
        fields: EventFields,
    ) -> Result<SaveDecision, ServiceError> {
        let existing = match event_id {
            Some(id) => self.events.find_by_id(id).await?,
            None => None,
        };
        Ok(match existing {
            Some(event) => SaveDecision::Update(event, fields),
            None => SaveDecision::Create(fields),
        })
    }

    /// Appends a review by the requesting individual and returns the event's
    /// full review list.
    pub async fn add_review(
        &self,
        requester_email: &str,
        text: &str,
        event_id: i64,
    ) -> Result<Vec<Review>, ServiceError> {
        let mut event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Event {event_id} was not found")))?;
        let individual = self
            .individuals
            .find_first_by_email(requester_email)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("No individual is registered for {requester_email}"))
            })?;

        event.add_review(Review::new(
            individual.display_name(),
            individual.email.clone(),
            text,
        ));
        let event = self.events.save(event).await?;
        info!(event_id, reviews = event.reviews.len(), "Added review");
        Ok(event.reviews)
    }
}
