//! Reservation interval entity model.

use sea_orm::entity::prelude::*;

/// One half-open reservation interval `[start_time, end_time)` on a spot.
///
/// The table has no surrogate key: an interval is identified by the triple
/// `(spot_id, start_time, user_email)` and every mutation targets that triple.
///
/// # Database Schema
///
/// | Column      | Type                    | Description                          |
/// |-------------|-------------------------|--------------------------------------|
/// | spot_id     | VARCHAR(255) (PK, FK)   | Reserved spot                        |
/// | start_time  | TIMESTAMPTZ (PK)        | Inclusive start                      |
/// | user_email  | VARCHAR(255) (PK, FK)   | Owner of the interval                |
/// | end_time    | TIMESTAMPTZ NULL        | Exclusive end, `NULL` = open-ended   |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "spot_reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub spot_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub start_time: DateTimeUtc,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_email: String,
    #[sea_orm(nullable)]
    pub end_time: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spot::Entity",
        from = "Column::SpotId",
        to = "super::spot::Column::Id",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    Spot,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserEmail",
        to = "super::user::Column::Email",
        on_update = "Restrict",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::spot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Spot.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
