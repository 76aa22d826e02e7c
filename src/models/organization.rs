use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{EmailKeyed, Entity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "datastoreId")]
    pub id: Option<i64>,
    pub email: String,
    pub name: String,
    /// Identifiers of the events this organization created, oldest first.
    #[serde(rename = "events")]
    pub event_ids: Vec<i64>,
}

impl Organization {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            name: name.into(),
            event_ids: Vec::new(),
        }
    }

    pub fn add_event(&mut self, event_id: i64) {
        self.event_ids.push(event_id);
    }
}

impl Entity for Organization {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl EmailKeyed for Organization {
    fn email(&self) -> &str {
        &self.email
    }
}
