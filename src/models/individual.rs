use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{EmailKeyed, Entity};

/// A person attending events. Only used to attribute reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    #[serde(rename = "datastoreId")]
    pub id: Option<i64>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Individual {
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Name shown next to the individual's reviews.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Individual {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl EmailKeyed for Individual {
    fn email(&self) -> &str {
        &self.email
    }
}
