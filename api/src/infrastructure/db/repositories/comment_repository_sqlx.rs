use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::comment_repository::CommentRepository;
use crate::application::ports::store_error::StoreResult;
use crate::domain::comments::{Comment, NewComment};
use crate::infrastructure::db::{PgPool, bounded, require_affected};

pub struct SqlxCommentRepository {
    pub pool: PgPool,
}

impl SqlxCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_comment(r: &PgRow) -> Comment {
    Comment {
        id: r.get("id"),
        user_id: r.get("user_id"),
        trip_id: r.get("trip_id"),
        comment: r.get("comment"),
        rating: r.get("rating"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl CommentRepository for SqlxCommentRepository {
    async fn create(&self, comment: &NewComment) -> StoreResult<Comment> {
        let row = bounded(
            sqlx::query(
                r#"INSERT INTO comments (user_id, trip_id, comment, rating)
                   VALUES ($1, $2, $3, $4)
                   RETURNING id, user_id, trip_id, comment, rating, created_at"#,
            )
            .bind(comment.user_id)
            .bind(comment.trip_id)
            .bind(&comment.comment)
            .bind(comment.rating)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_comment(&row))
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Comment> {
        let row = bounded(
            sqlx::query(
                r#"SELECT id, user_id, trip_id, comment, rating, created_at
                   FROM comments WHERE id = $1"#,
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await?;
        Ok(map_comment(&row))
    }

    async fn list_by_trip(&self, trip_id: i64) -> StoreResult<Vec<Comment>> {
        let rows = bounded(
            sqlx::query(
                r#"SELECT id, user_id, trip_id, comment, rating, created_at
                   FROM comments WHERE trip_id = $1 ORDER BY created_at DESC, id DESC"#,
            )
            .bind(trip_id)
            .fetch_all(&self.pool),
        )
        .await?;
        Ok(rows.iter().map(map_comment).collect())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM comments WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }

    async fn delete_by_trip(&self, trip_id: i64) -> StoreResult<()> {
        let res = bounded(
            sqlx::query("DELETE FROM comments WHERE trip_id = $1")
                .bind(trip_id)
                .execute(&self.pool),
        )
        .await?;
        require_affected(res.rows_affected())
    }
}
