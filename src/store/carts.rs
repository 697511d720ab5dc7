use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    entity::carts::{ActiveModel, Column, Entity as Carts, LineItems, Model},
    models::{Cart, LineItem, compute_total},
};

/// The user's open (not checked out) cart, if any.
pub async fn find_open(db: &impl ConnectionTrait, user: &str) -> Result<Option<Model>, DbErr> {
    Carts::find()
        .filter(Column::User.eq(user))
        .filter(Column::IsCheckout.eq(false))
        .one(db)
        .await
}

pub async fn create(
    db: &impl ConnectionTrait,
    user: &str,
    items: Vec<LineItem>,
) -> Result<Model, DbErr> {
    let now = Utc::now();
    ActiveModel {
        id: Set(Uuid::now_v7()),
        user: Set(user.to_owned()),
        total_price: Set(compute_total(&items)),
        items: Set(LineItems(items)),
        is_checkout: Set(false),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await
}

/// Replace the cart's items and persist, recomputing the total.
pub async fn save_items(
    db: &impl ConnectionTrait,
    cart: Model,
    items: Vec<LineItem>,
) -> Result<Model, DbErr> {
    let mut active: ActiveModel = cart.into();
    active.total_price = Set(compute_total(&items));
    active.items = Set(LineItems(items));
    active.updated_at = Set(Utc::now().into());
    active.update(db).await
}

/// Flip an open cart to checked out. Returns whether a row was changed.
pub async fn mark_checked_out(db: &impl ConnectionTrait, id: Uuid) -> Result<bool, DbErr> {
    let result = Carts::update_many()
        .col_expr(Column::IsCheckout, Expr::value(true))
        .col_expr(
            Column::UpdatedAt,
            Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(Utc::now())),
        )
        .filter(Column::Id.eq(id))
        .filter(Column::IsCheckout.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

pub async fn find_by_ids(
    db: &impl ConnectionTrait,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let carts = Carts::find().filter(Column::Id.is_in(ids)).all(db).await?;
    Ok(carts.into_iter().map(|cart| (cart.id, cart)).collect())
}

pub fn cart_from_entity(model: Model) -> Cart {
    Cart {
        id: model.id,
        user: model.user,
        items: model.items.0,
        is_checkout: model.is_checkout,
        total_price: model.total_price,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
