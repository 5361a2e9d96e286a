use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum PointHistories {
    Table,
    Id,
    UserId,
    PointChange,
    Type,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PointItems {
    Table,
    Id,
    Name,
    Description,
    Price,
    ImageUrl,
    Code,
    CreatedAt,
}

#[derive(DeriveIden)]
enum PointItemPurchases {
    Table,
    Id,
    UserId,
    ItemId,
    PurchasedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointHistories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointHistories::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointHistories::PointChange)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointHistories::Type)
                            .string_len(30)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointHistories::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_point_histories_user_created_at")
                    .table(PointHistories::Table)
                    .col(PointHistories::UserId)
                    .col(PointHistories::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PointItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PointItems::Name).string_len(100).not_null())
                    .col(ColumnDef::new(PointItems::Description).string().null())
                    .col(ColumnDef::new(PointItems::Price).integer().not_null())
                    .col(ColumnDef::new(PointItems::ImageUrl).string().null())
                    .col(ColumnDef::new(PointItems::Code).string_len(50).null())
                    .col(
                        ColumnDef::new(PointItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 种子数据按名字幂等插入
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_point_items_name")
                    .table(PointItems::Table)
                    .col(PointItems::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PointItemPurchases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PointItemPurchases::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PointItemPurchases::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointItemPurchases::ItemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PointItemPurchases::PurchasedAt)
                            .timestamp_with_time_zone()
                            .default(Expr::cust("NOW()"))
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一商品限购一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_point_item_purchases_user_item")
                    .table(PointItemPurchases::Table)
                    .col(PointItemPurchases::UserId)
                    .col(PointItemPurchases::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PointItemPurchases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PointItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PointHistories::Table).to_owned())
            .await?;
        Ok(())
    }
}
