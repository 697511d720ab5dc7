use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    entity::checkouts::{ActiveModel, Column, Entity as Checkouts, Model},
    models::CheckoutRecord,
};

// Append-only: records are created at checkout and never updated or deleted.

pub async fn create(
    db: &impl ConnectionTrait,
    user: &str,
    cart_id: Uuid,
    total_price: f64,
) -> Result<Model, DbErr> {
    ActiveModel {
        id: Set(Uuid::now_v7()),
        user: Set(user.to_owned()),
        cart_id: Set(cart_id),
        total_price: Set(total_price),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
}

/// All records for `user`, newest first.
pub async fn list_for_user(db: &impl ConnectionTrait, user: &str) -> Result<Vec<Model>, DbErr> {
    Checkouts::find()
        .filter(Column::User.eq(user))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await
}

pub async fn count_for_user(db: &impl ConnectionTrait, user: &str) -> Result<u64, DbErr> {
    Checkouts::find()
        .filter(Column::User.eq(user))
        .count(db)
        .await
}

pub fn checkout_from_entity(model: Model) -> CheckoutRecord {
    CheckoutRecord {
        id: model.id,
        user: model.user,
        cart_id: model.cart_id,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
