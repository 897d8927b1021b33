use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ColumnType;

use crate::m20250101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Blogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Blogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Blogs::Title).string().not_null().unique_key())
                    .col(ColumnDef::new(Blogs::Description).text().not_null())
                    .col(ColumnDef::new(Blogs::Body).text().not_null())
                    .col(
                        ColumnDef::new(Blogs::Tags)
                            .array(ColumnType::Text)
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(ColumnDef::new(Blogs::Author).string().not_null())
                    .col(ColumnDef::new(Blogs::OwnerId).uuid().not_null())
                    .col(
                        ColumnDef::new(Blogs::State)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(Blogs::ReadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Blogs::ReadTime).double().not_null())
                    .col(
                        ColumnDef::new(Blogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Blogs::LastUpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blogs_owner_id")
                            .from(Blogs::Table, Blogs::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters on state and sorts by one of these columns.
        for (name, column) in [
            ("idx_blogs_state_created_at", Blogs::CreatedAt),
            ("idx_blogs_state_read_count", Blogs::ReadCount),
            ("idx_blogs_state_read_time", Blogs::ReadTime),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Blogs::Table)
                        .col(Blogs::State)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Blogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Blogs {
    Table,
    Id,
    Title,
    Description,
    Body,
    Tags,
    Author,
    OwnerId,
    State,
    ReadCount,
    ReadTime,
    CreatedAt,
    LastUpdatedAt,
}
