use std::future::Future;
use std::time::Duration;

use sqlx::{Pool, Postgres};

use crate::application::ports::store_error::{StoreError, StoreResult};
use crate::bootstrap::config::Config;

pub type PgPool = Pool<Postgres>;

/// Upper bound for any single statement.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const UNIQUE_VIOLATION: &str = "23505";
const CHECK_VIOLATION: &str = "23514";

pub async fn connect_pool(cfg: &Config) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(cfg.db_max_open_conns)
        .min_connections(cfg.db_max_idle_conns)
        .idle_timeout(cfg.db_max_idle_time)
        .acquire_timeout(QUERY_TIMEOUT)
        .connect(&cfg.database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Runs one statement under [`QUERY_TIMEOUT`] and classifies its failure.
pub async fn bounded<T, F>(fut: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(QUERY_TIMEOUT, fut).await {
        Ok(res) => res.map_err(classify),
        Err(_) => Err(StoreError::Timeout),
    }
}

pub fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            StoreError::Conflict(constraint)
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(CHECK_VIOLATION) => {
            let constraint = db_err.constraint().unwrap_or("check").to_string();
            StoreError::Invalid(constraint)
        }
        other => StoreError::Other(other.into()),
    }
}

/// Maps "zero rows affected" to `NotFound` once the statement itself succeeded.
pub fn require_affected(rows_affected: u64) -> StoreResult<()> {
    if rows_affected == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

pub mod repositories;

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    /// Minimal driver error carrying a SQLSTATE and constraint name.
    #[derive(Debug)]
    struct PgFailure {
        code: &'static str,
        constraint: &'static str,
    }

    impl fmt::Display for PgFailure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {} on {}", self.code, self.constraint)
        }
    }

    impl StdError for PgFailure {}

    impl DatabaseError for PgFailure {
        fn message(&self) -> &str {
            "constraint failure"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                "23514" => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn pg(code: &'static str, constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgFailure { code, constraint }))
    }

    #[test]
    fn unique_violation_is_conflict_on_constraint() {
        match classify(pg("23505", "users_email_key")) {
            StoreError::Conflict(c) => assert_eq!(c, "users_email_key"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn check_violation_is_invalid() {
        match classify(pg("23514", "trips_seats_check")) {
            StoreError::Invalid(c) => assert_eq!(c, "trips_seats_check"),
            other => panic!("expected invalid, got {other:?}"),
        }
    }

    #[test]
    fn foreign_key_violation_stays_opaque() {
        assert!(matches!(
            classify(pg("23503", "bookings_trip_id_fkey")),
            StoreError::Other(_)
        ));
    }

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            StoreError::NotFound
        ));
    }

    #[test]
    fn pool_errors_are_opaque() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            StoreError::Other(_)
        ));
    }

    #[test]
    fn zero_rows_affected_is_not_found() {
        assert!(matches!(require_affected(0), Err(StoreError::NotFound)));
        assert!(require_affected(3).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_statement_times_out() {
        let res: StoreResult<()> = bounded(async {
            tokio::time::sleep(QUERY_TIMEOUT * 2).await;
            Ok(())
        })
        .await;
        assert!(matches!(res, Err(StoreError::Timeout)));
    }
}
