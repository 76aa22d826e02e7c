pub mod event;
pub mod individual;
pub mod organization;
pub mod user;

pub use event::{Event, EventFields, Review};
pub use individual::Individual;
pub use organization::Organization;
pub use user::User;

/// A record kept in the entity store under a numeric identifier.
///
/// `id` is `None` until the store has assigned one on first save.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> Option<i64>;
    fn assign_id(&mut self, id: i64);
}

/// Entities that can be looked up by their account email.
pub trait EmailKeyed {
    fn email(&self) -> &str;
}
