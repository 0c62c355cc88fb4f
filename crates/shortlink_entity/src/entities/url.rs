use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 短链接记录
///
/// 列名沿用数据库中的驼峰命名，字段名使用 Rust 的下划线风格。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "url")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "shortCode", unique)]
    pub short_code: String,
    #[sea_orm(column_name = "originalUrl", column_type = "Text")]
    pub original_url: String,
    pub clicks: i32,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
