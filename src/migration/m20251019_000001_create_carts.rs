use sea_orm::Schema;
use sea_orm_migration::prelude::*;

use crate::entity::{Carts, carts};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());
        manager
            .create_table(
                schema
                    .create_table_from_entity(Carts)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // open-cart lookups filter on both columns
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_carts_user_is_checkout")
                    .table(Carts)
                    .col(carts::Column::User)
                    .col(carts::Column::IsCheckout)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Carts).if_exists().to_owned())
            .await
    }
}
