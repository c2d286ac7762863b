//! Migration: Create messages table.
//!
//! src_id/dst_id are validated by the service layer at creation time and
//! deliberately carry no foreign key, so deleting a user does not touch
//! conversation history.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::SrcId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::DstId).big_integer().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Conversation retrieval scans one (src, dst) orientation at a time.
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_src_dst_created_at")
                    .table(Messages::Table)
                    .col(Messages::SrcId)
                    .col(Messages::DstId)
                    .col(Messages::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SrcId,
    DstId,
    Content,
    CreatedAt,
}
