//! Artist rating aggregate.
//!
//! Review writers first take the artist row lock with [`lock_artist`], then mutate the
//! review, then run [`recompute`]. Writers for the same artist queue on that lock, so under
//! READ COMMITTED the recompute's subquery starts after every earlier writer has committed
//! and sees all of their reviews. SQLite serializes writers and drops the lock clause.

use sea_orm::{sea_query::Expr, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Select};
use tracing::debug;

use models::artist;

use crate::errors::ServiceError;

const AVERAGE_SQL: &str =
    "COALESCE((SELECT CAST(AVG(star_rating) AS DOUBLE PRECISION) FROM reviews WHERE artist_id = ?), 0)";

fn locked(artist_id: i32) -> Select<artist::Entity> {
    artist::Entity::find_by_id(artist_id).lock_exclusive()
}

/// `SELECT ... FOR UPDATE` on the artist; 404 when it does not exist.
pub async fn lock_artist<C: ConnectionTrait>(txn: &C, artist_id: i32) -> Result<artist::Model, ServiceError> {
    locked(artist_id)
        .one(txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Artist"))
}

/// Set `artist_id`'s `average_rating` to the mean of its reviews, or 0 without reviews.
pub async fn recompute<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<(), ServiceError> {
    let res = artist::Entity::update_many()
        .col_expr(artist::Column::AverageRating, Expr::cust_with_values(AVERAGE_SQL, [artist_id]))
        .filter(artist::Column::Id.eq(artist_id))
        .exec(db)
        .await?;
    debug!(artist_id, rows = res.rows_affected, "average_rating_recomputed");
    Ok(())
}
