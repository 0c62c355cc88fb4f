use sea_orm::{sqlx, DbErr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShortlinkError {
    #[error("invalid configuration: {0}")]
    Config(String),
    /// 数据库返回的错误，原样透传
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Pool(#[from] sqlx::Error),
}

pub type Result<T, E = ShortlinkError> = std::result::Result<T, E>;
