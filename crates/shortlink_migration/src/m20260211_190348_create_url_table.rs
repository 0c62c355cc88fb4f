use sea_orm_migration::prelude::*;

/// 创建短链接 url 表
///
/// 不使用 IF NOT EXISTS / IF EXISTS：重复执行或回滚不存在的表时，
/// 由数据库返回的错误原样交给迁移执行器处理。
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Url::Table)
                    .col(
                        ColumnDef::new(Url::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Url::ShortCode).string_len(10).not_null().unique_key())
                    .col(ColumnDef::new(Url::OriginalUrl).text().not_null())
                    .col(ColumnDef::new(Url::Clicks).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Url::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Url::Table).to_owned()).await
    }
}

// 列名与线上已有的库保持一致（驼峰）
#[derive(DeriveIden)]
pub enum Url {
    Table,
    Id,
    #[sea_orm(iden = "shortCode")]
    ShortCode,
    #[sea_orm(iden = "originalUrl")]
    OriginalUrl,
    Clicks,
    #[sea_orm(iden = "createdAt")]
    CreatedAt,
}
