//! Postgres-backed submission store.
//!
//! Works against any Postgres-compatible endpoint, Neon included. The table
//! layout is in `sql/contact_submissions.sql`.

use std::time::Duration;

use async_trait::async_trait;
use axyn_core::{NewSubmission, StoreError, SubmissionReceipt, SubmissionStats, SubmissionStore};
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Upper bound on pooled connections. A contact form sees little traffic.
const MAX_CONNECTIONS: u32 = 5;

const INSERT_SUBMISSION: &str = "INSERT INTO contact_submissions (name, email, message)
     VALUES ($1, $2, $3)
     RETURNING id, created_at";

const SUBMISSION_STATS: &str = "SELECT
        COUNT(*) AS total,
        COUNT(CASE WHEN status = 'pending' THEN 1 END) AS pending,
        COUNT(CASE WHEN status = 'reviewed' THEN 1 END) AS reviewed,
        COUNT(CASE WHEN status = 'contacted' THEN 1 END) AS contacted,
        COUNT(CASE WHEN created_at >= CURRENT_DATE THEN 1 END) AS today
     FROM contact_submissions";

#[derive(Debug, sqlx::FromRow)]
struct ReceiptRow {
    id: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total: i64,
    pending: i64,
    reviewed: i64,
    contacted: i64,
    today: i64,
}

/// [`SubmissionStore`] over a lazily connected Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a pool without opening a connection.
    ///
    /// Fails only when the connection string cannot be parsed; network errors
    /// surface on the first query.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(classify)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        let row: ReceiptRow = sqlx::query_as(INSERT_SUBMISSION)
            .bind(&submission.name)
            .bind(&submission.email)
            .bind(&submission.message)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(SubmissionReceipt {
            id: row.id,
            created_at: row.created_at,
        })
    }

    async fn stats(&self) -> Result<SubmissionStats, StoreError> {
        let row: StatsRow = sqlx::query_as(SUBMISSION_STATS)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(SubmissionStats {
            total: row.total,
            pending: row.pending,
            reviewed: row.reviewed,
            contacted: row.contacted,
            today: row.today,
        })
    }
}

/// Map a driver error onto the engine-neutral store taxonomy.
fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Duplicate,
        sqlx::Error::Configuration(source) => StoreError::Unavailable(source.to_string()),
        other => StoreError::backend(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};

    const SCHEMA: &str = include_str!("../sql/contact_submissions.sql");

    /// Driver error carrying a fixed constraint kind.
    #[derive(Debug)]
    struct ConstraintError(ErrorKind);

    impl std::fmt::Display for ConstraintError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "constraint violated: {:?}", self.0)
        }
    }

    impl std::error::Error for ConstraintError {}

    impl DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.0 {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    #[test]
    fn unique_violation_is_duplicate() {
        let err = classify(sqlx::Error::Database(Box::new(ConstraintError(
            ErrorKind::UniqueViolation,
        ))));
        assert!(matches!(err, StoreError::Duplicate), "{err:?}");
    }

    #[test]
    fn other_constraint_violation_is_backend() {
        let err = classify(sqlx::Error::Database(Box::new(ConstraintError(
            ErrorKind::CheckViolation,
        ))));
        assert!(matches!(err, StoreError::Backend(_)), "{err:?}");
    }

    #[test]
    fn schema_leaves_email_length_unbounded() {
        let email_column = SCHEMA
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("email "))
            .unwrap();
        assert!(email_column.contains("TEXT"), "{email_column}");
        assert!(!email_column.contains("VARCHAR"), "{email_column}");
    }

    #[test]
    fn schema_bounds_match_validation() {
        assert!(SCHEMA.contains(&format!("VARCHAR({})", axyn_core::NAME_MAX_CHARS)));
        assert!(SCHEMA.contains(&format!("VARCHAR({})", axyn_core::MESSAGE_MAX_CHARS)));
        assert!(SCHEMA.contains("CREATE UNIQUE INDEX"));
    }

    #[test]
    fn unparseable_url_is_unavailable() {
        let err = PgStore::connect_lazy("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "{err:?}");
    }

    #[test]
    fn driver_errors_map_to_backend() {
        let err = classify(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));

        let err = classify(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn insert_binds_parameters() {
        assert!(INSERT_SUBMISSION.contains("VALUES ($1, $2, $3)"));
        assert!(INSERT_SUBMISSION.contains("RETURNING id, created_at"));
    }
}
