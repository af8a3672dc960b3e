//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::{LinkRepository, LinkWithOwner};
use crate::error::AppError;
use crate::utils::db_error::{SHORT_CODE_CONSTRAINT, is_unique_violation_on};

#[derive(FromRow)]
struct LinkRow {
    id: i64,
    original_link: String,
    converted_link: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.original_link, r.converted_link, r.user_id, r.created_at)
    }
}

#[derive(FromRow)]
struct LinkOwnerRow {
    #[sqlx(flatten)]
    link: LinkRow,
    username: String,
}

/// Maps a write error, turning a short code unique violation into
/// [`AppError::DuplicateCode`].
fn map_write_error(e: sqlx::Error, code: &str) -> AppError {
    if is_unique_violation_on(&e, SHORT_CODE_CONSTRAINT) {
        AppError::DuplicateCode {
            code: code.to_string(),
        }
    } else {
        AppError::from(e)
    }
}

/// PostgreSQL repository for link mappings.
///
/// Short code uniqueness is enforced by the `links_converted_link_key`
/// constraint, so concurrent inserts of the same code cannot both succeed.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (original_link, converted_link, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, original_link, converted_link, user_id, created_at
            "#,
        )
        .bind(&new_link.original_link)
        .bind(&new_link.short_code)
        .bind(new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, &new_link.short_code))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_link, converted_link, user_id, created_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, original_link, converted_link, user_id, created_at
            FROM links
            WHERE converted_link = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_with_owners(&self) -> Result<Vec<LinkWithOwner>, AppError> {
        let rows = sqlx::query_as::<_, LinkOwnerRow>(
            r#"
            SELECT l.id, l.original_link, l.converted_link, l.user_id, l.created_at, u.username
            FROM users u
            JOIN links l ON u.id = l.user_id
            ORDER BY u.id, l.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LinkWithOwner {
                link: r.link.into(),
                username: r.username,
            })
            .collect())
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET original_link = $2, converted_link = $3
            WHERE id = $1
            RETURNING id, original_link, converted_link, user_id, created_at
            "#,
        )
        .bind(id)
        .bind(&update.original_link)
        .bind(&update.short_code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, &update.short_code))?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
