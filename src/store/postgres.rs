//! PostgreSQL-backed repositories.
//!
//! Reviews are stored as a JSONB array on the event row and an
//! organization's events as a BIGINT[] of event ids, so each save is a
//! single-row upsert.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::{EmailLookup, RepoError, Repository, UserRepository};
use crate::models::{Event, Individual, Organization, Review, User};

#[derive(FromRow)]
struct EventRow {
    id: i64,
    organization_name: String,
    organization_id: i64,
    title: String,
    date_time: String,
    description: String,
    latitude: f64,
    longitude: f64,
    food_available: bool,
    required_fee: bool,
    reviews: Json<Vec<Review>>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: Some(row.id),
            organization_name: row.organization_name,
            organization_id: row.organization_id,
            event_title: row.title,
            event_date_time: row.date_time,
            event_description: row.description,
            event_latitude: row.latitude,
            event_longitude: row.longitude,
            food_available: row.food_available,
            required_fee: row.required_fee,
            reviews: row.reviews.0,
        }
    }
}

const EVENT_COLUMNS: &str = "id, organization_name, organization_id, title, date_time, \
     description, latitude, longitude, food_available, required_fee, reviews";

#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Event> for PgEventRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, RepoError> {
        let row: Option<EventRow> =
            sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Event::from))
    }

    async fn find_all(&self) -> Result<Vec<Event>, RepoError> {
        let rows: Vec<EventRow> =
            sqlx::query_as(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn save(&self, mut event: Event) -> Result<Event, RepoError> {
        let reviews = Json(event.reviews.clone());
        let id: i64 = match event.id {
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO events
                        (organization_name, organization_id, title, date_time, description,
                         latitude, longitude, food_available, required_fee, reviews)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    RETURNING id
                    "#,
                )
                .bind(&event.organization_name)
                .bind(event.organization_id)
                .bind(&event.event_title)
                .bind(&event.event_date_time)
                .bind(&event.event_description)
                .bind(event.event_latitude)
                .bind(event.event_longitude)
                .bind(event.food_available)
                .bind(event.required_fee)
                .bind(reviews)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO events
                        (id, organization_name, organization_id, title, date_time, description,
                         latitude, longitude, food_available, required_fee, reviews)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    ON CONFLICT (id) DO UPDATE SET
                        organization_name = EXCLUDED.organization_name,
                        organization_id = EXCLUDED.organization_id,
                        title = EXCLUDED.title,
                        date_time = EXCLUDED.date_time,
                        description = EXCLUDED.description,
                        latitude = EXCLUDED.latitude,
                        longitude = EXCLUDED.longitude,
                        food_available = EXCLUDED.food_available,
                        required_fee = EXCLUDED.required_fee,
                        reviews = EXCLUDED.reviews
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&event.organization_name)
                .bind(event.organization_id)
                .bind(&event.event_title)
                .bind(&event.event_date_time)
                .bind(&event.event_description)
                .bind(event.event_latitude)
                .bind(event.event_longitude)
                .bind(event.food_available)
                .bind(event.required_fee)
                .bind(reviews)
                .fetch_one(&self.pool)
                .await?
            }
        };

        event.id = Some(id);
        Ok(event)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgOrganizationRepository {
    pool: PgPool,
}

impl PgOrganizationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Organization> for PgOrganizationRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Organization>, RepoError> {
        Ok(sqlx::query_as(
            "SELECT id, email, name, event_ids FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self) -> Result<Vec<Organization>, RepoError> {
        Ok(
            sqlx::query_as("SELECT id, email, name, event_ids FROM organizations ORDER BY id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn save(&self, mut organization: Organization) -> Result<Organization, RepoError> {
        let id: i64 = match organization.id {
            None => {
                sqlx::query_scalar(
                    "INSERT INTO organizations (email, name, event_ids) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&organization.email)
                .bind(&organization.name)
                .bind(&organization.event_ids)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO organizations (id, email, name, event_ids)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (id) DO UPDATE SET
                        email = EXCLUDED.email,
                        name = EXCLUDED.name,
                        event_ids = EXCLUDED.event_ids
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&organization.email)
                .bind(&organization.name)
                .bind(&organization.event_ids)
                .fetch_one(&self.pool)
                .await?
            }
        };

        organization.id = Some(id);
        Ok(organization)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EmailLookup<Organization> for PgOrganizationRepository {
    async fn find_first_by_email(&self, email: &str) -> Result<Option<Organization>, RepoError> {
        Ok(sqlx::query_as(
            "SELECT id, email, name, event_ids FROM organizations WHERE email = $1 ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[derive(Clone)]
pub struct PgIndividualRepository {
    pool: PgPool,
}

impl PgIndividualRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Individual> for PgIndividualRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Individual>, RepoError> {
        Ok(sqlx::query_as(
            "SELECT id, email, first_name, last_name FROM individuals WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_all(&self) -> Result<Vec<Individual>, RepoError> {
        Ok(sqlx::query_as(
            "SELECT id, email, first_name, last_name FROM individuals ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn save(&self, mut individual: Individual) -> Result<Individual, RepoError> {
        let id: i64 = match individual.id {
            None => {
                sqlx::query_scalar(
                    "INSERT INTO individuals (email, first_name, last_name) VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(&individual.email)
                .bind(&individual.first_name)
                .bind(&individual.last_name)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO individuals (id, email, first_name, last_name)
                    VALUES ($1, $2, $3, $4)
                    ON CONFLICT (id) DO UPDATE SET
                        email = EXCLUDED.email,
                        first_name = EXCLUDED.first_name,
                        last_name = EXCLUDED.last_name
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&individual.email)
                .bind(&individual.first_name)
                .bind(&individual.last_name)
                .fetch_one(&self.pool)
                .await?
            }
        };

        individual.id = Some(id);
        Ok(individual)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM individuals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EmailLookup<Individual> for PgIndividualRepository {
    async fn find_first_by_email(&self, email: &str) -> Result<Option<Individual>, RepoError> {
        Ok(sqlx::query_as(
            "SELECT id, email, first_name, last_name FROM individuals WHERE email = $1 ORDER BY id LIMIT 1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?)
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(sqlx::query_as("SELECT id, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(sqlx::query_as("SELECT id, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?)
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let id: i64 = match user.id {
            None => {
                sqlx::query_scalar("INSERT INTO users (email) VALUES ($1) RETURNING id")
                    .bind(&user.email)
                    .fetch_one(&self.pool)
                    .await?
            }
            Some(id) => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO users (id, email) VALUES ($1, $2)
                    ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&user.email)
                .fetch_one(&self.pool)
                .await?
            }
        };

        user.id = Some(id);
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError> {
        Ok(sqlx::query_as("SELECT id, email FROM users WHERE email = $1 ORDER BY id")
            .bind(email)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, RepoError> {
        let result = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
