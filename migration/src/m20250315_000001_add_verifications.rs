use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Verifications {
    Table,
    Id,
    UserId,
    PostId,
    Status,
    DetoxTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Verifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Verifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Verifications::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Verifications::PostId).big_integer().not_null())
                    .col(ColumnDef::new(Verifications::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Verifications::DetoxTime).integer().null())
                    .col(
                        ColumnDef::new(Verifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Verifications::UpdatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 审核队列按状态扫描
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_verifications_status")
                    .table(Verifications::Table)
                    .col(Verifications::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_verifications_user_created_at")
                    .table(Verifications::Table)
                    .col(Verifications::UserId)
                    .col(Verifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Verifications::Table).to_owned())
            .await?;
        Ok(())
    }
}
