use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{EmailLookup, RepoError, Repository, UserRepository};
use crate::models::{EmailKeyed, Entity, User};

/// Process-local store. Identifiers are handed out sequentially from 1 and
/// `find_all` returns entities in identifier order.
pub struct MemoryRepository<T> {
    table: RwLock<Table<T>>,
}

struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        let mut table = self.table.write().await;
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = table.next_id;
                entity.assign_id(id);
                id
            }
        };
        // Caller-chosen ids must never be handed out again.
        table.next_id = table.next_id.max(id + 1);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl<T: Entity + EmailKeyed> EmailLookup<T> for MemoryRepository<T> {
    async fn find_first_by_email(&self, email: &str) -> Result<Option<T>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|row| row.email() == email).cloned())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|user| user.email == email)
            .cloned()
            .collect())
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, RepoError> {
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|_, user| user.email != email);
        Ok((before - table.rows.len()) as u64)
    }
}
