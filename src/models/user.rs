use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{EmailKeyed, Entity};

/// Account identity, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> Option<i64> {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl EmailKeyed for User {
    fn email(&self) -> &str {
        &self.email
    }
}
