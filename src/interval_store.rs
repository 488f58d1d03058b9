use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entity::reservation::{self, ActiveModel as ReservationActiveModel};
use crate::error::{ReservationError, Result};
use crate::model::{Interval, Timestamp};

/// Persistent per-spot interval table.
///
/// Implemented for every Sea-ORM [`ConnectionTrait`], so the same calls run
/// against a plain [`sea_orm::DatabaseConnection`] or inside a
/// [`sea_orm::DatabaseTransaction`]. The store does not enforce the
/// non-overlap invariant; callers keep it by reading the overlap set and
/// mutating within one transaction.
#[async_trait]
pub trait IntervalStore {
    /// Intervals of `spot_id` overlapping `[start, end)`, ordered by start.
    ///
    /// `end == None` is an unbounded query: it matches every interval still
    /// active at `start` and everything starting later.
    async fn find_overlapping(
        &self,
        spot_id: &str,
        start: Timestamp,
        end: Option<Timestamp>,
    ) -> Result<Vec<Interval>>;

    /// Every interval of `spot_id`, ordered by start.
    async fn spot_timeline(&self, spot_id: &str) -> Result<Vec<Interval>>;

    /// Fails with [`ReservationError::Conflict`] if an interval with the same
    /// `(spot_id, start, owner_email)` already exists.
    async fn insert_interval(&self, interval: &Interval) -> Result<()>;

    /// Returns the number of rows removed.
    async fn delete_interval(&self, interval: &Interval) -> Result<u64>;

    async fn set_interval_end(&self, interval: &Interval, end: Timestamp) -> Result<u64>;

    async fn set_interval_start(&self, interval: &Interval, start: Timestamp) -> Result<u64>;
}

/// Filter matching exactly the row identified by the interval's key triple.
fn key_condition(interval: &Interval) -> Condition {
    Condition::all()
        .add(reservation::Column::SpotId.eq(interval.spot_id.as_str()))
        .add(reservation::Column::StartTime.eq(interval.start))
        .add(reservation::Column::UserEmail.eq(interval.owner_email.as_str()))
}

#[async_trait]
impl<C> IntervalStore for C
where
    C: ConnectionTrait,
{
    async fn find_overlapping(
        &self,
        spot_id: &str,
        start: Timestamp,
        end: Option<Timestamp>,
    ) -> Result<Vec<Interval>> {
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::SpotId.eq(spot_id))
            .filter(
                Condition::any()
                    .add(reservation::Column::EndTime.is_null())
                    .add(reservation::Column::EndTime.gt(start)),
            );
        if let Some(end) = end {
            query = query.filter(reservation::Column::StartTime.lt(end));
        }

        let rows = query
            .order_by_asc(reservation::Column::StartTime)
            .all(self)
            .await?;
        Ok(rows.into_iter().map(Interval::from).collect())
    }

    async fn spot_timeline(&self, spot_id: &str) -> Result<Vec<Interval>> {
        let rows = reservation::Entity::find()
            .filter(reservation::Column::SpotId.eq(spot_id))
            .order_by_asc(reservation::Column::StartTime)
            .all(self)
            .await?;
        Ok(rows.into_iter().map(Interval::from).collect())
    }

    async fn insert_interval(&self, interval: &Interval) -> Result<()> {
        let model = ReservationActiveModel {
            spot_id: Set(interval.spot_id.clone()),
            start_time: Set(interval.start),
            user_email: Set(interval.owner_email.clone()),
            end_time: Set(interval.end),
        };

        reservation::Entity::insert(model)
            .exec_without_returning(self)
            .await
            .map_err(|e| {
                ReservationError::from_insert(
                    e,
                    format!(
                        "reservation of spot {} at {} for {}",
                        interval.spot_id, interval.start, interval.owner_email
                    ),
                )
            })?;
        Ok(())
    }

    async fn delete_interval(&self, interval: &Interval) -> Result<u64> {
        let res = reservation::Entity::delete_many()
            .filter(key_condition(interval))
            .exec(self)
            .await?;
        Ok(res.rows_affected)
    }

    async fn set_interval_end(&self, interval: &Interval, end: Timestamp) -> Result<u64> {
        let res = reservation::Entity::update_many()
            .col_expr(reservation::Column::EndTime, Expr::value(end))
            .filter(key_condition(interval))
            .exec(self)
            .await?;
        Ok(res.rows_affected)
    }

    async fn set_interval_start(&self, interval: &Interval, start: Timestamp) -> Result<u64> {
        let res = reservation::Entity::update_many()
            .col_expr(reservation::Column::StartTime, Expr::value(start))
            .filter(key_condition(interval))
            .exec(self)
            .await?;
        Ok(res.rows_affected)
    }
}
