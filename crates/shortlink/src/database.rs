use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sea_orm::sqlx::{self, Executor};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use shortlink_migration::{MigrationName, Migrator, MigratorTrait, SchemaManager};
use tracing::{debug, info};

use crate::config::{Config, DatabaseTarget};
use crate::error::ShortlinkError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// 创建 SQLite 连接选项
fn create_sqlite_options(path: &Path) -> SqliteConnectOptions {
    SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(BUSY_TIMEOUT)
        .pragma("temp_store", "MEMORY")
}

async fn sqlite_connection(path: &Path, max_connections: u32) -> Result<DatabaseConnection, ShortlinkError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| ShortlinkError::Config(format!("cannot create {}: {}", dir.display(), e)))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(BUSY_TIMEOUT)
        .idle_timeout(Duration::from_secs(600))
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                let row: (i64,) = sqlx::query_as("PRAGMA busy_timeout;").fetch_one(&mut *conn).await?;
                debug!("新数据库连接已创建，busy_timeout = {}ms", row.0);
                Ok(())
            })
        })
        .connect_with(create_sqlite_options(path))
        .await?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

async fn open(config: &Config, max_connections: u32) -> Result<DatabaseConnection, ShortlinkError> {
    match &config.database {
        DatabaseTarget::Sqlite(path) => sqlite_connection(path, max_connections).await,
        DatabaseTarget::Postgres(url) => {
            let mut opt = ConnectOptions::new(url.as_str());
            opt.max_connections(max_connections)
                .min_connections(1)
                .acquire_timeout(BUSY_TIMEOUT)
                .sqlx_logging(false);
            Ok(Database::connect(opt).await?)
        }
    }
}

/// 打开工作用的连接池
pub async fn connect(config: &Config) -> Result<DatabaseConnection, ShortlinkError> {
    let connection = open(config, config.max_connections).await?;
    debug!(
        "数据库连接池已创建：{}，最多 {} 个连接",
        config.database.display_name(),
        config.max_connections
    );
    Ok(connection)
}

/// 应用所有未执行的迁移
pub async fn migrate_up(connection: &DatabaseConnection) -> Result<(), ShortlinkError> {
    let pending = Migrator::get_pending_migrations(connection).await?;
    if pending.is_empty() {
        debug!("没有需要应用的迁移");
        return Ok(());
    }
    for migration in &pending {
        info!("应用迁移 {}", migration.name());
    }
    Migrator::up(connection, None).await?;
    Ok(())
}

/// 回滚最近的 steps 个迁移，错误原样返回
pub async fn migrate_down(connection: &DatabaseConnection, steps: u32) -> Result<(), ShortlinkError> {
    Migrator::down(connection, Some(steps)).await?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

pub async fn migration_status(connection: &DatabaseConnection) -> Result<Vec<MigrationState>, ShortlinkError> {
    let applied: HashSet<String> = Migrator::get_applied_migrations(connection)
        .await?
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    Ok(Migrator::migrations()
        .iter()
        .map(|m| MigrationState {
            name: m.name().to_string(),
            applied: applied.contains(m.name()),
        })
        .collect())
}

pub async fn url_table_exists(connection: &DatabaseConnection) -> Result<bool, ShortlinkError> {
    Ok(SchemaManager::new(connection).has_table("url").await?)
}

/// 进行数据库迁移并获取数据库连接
///
/// 迁移使用单连接池，完成后立即关闭，避免多连接导致的迁移顺序问题。
pub async fn setup_database(config: &Config) -> Result<DatabaseConnection> {
    let migration_conn = open(config, 1).await.context("打开迁移连接失败")?;
    migrate_up(&migration_conn).await.context("数据库迁移失败")?;
    migration_conn.close().await.context("关闭迁移连接失败")?;
    debug!("迁移完成，已关闭迁移连接池");

    connect(config).await.context("获取数据库连接失败")
}

pub async fn rollback_database(config: &Config, steps: u32) -> Result<()> {
    let connection = open(config, 1).await.context("打开迁移连接失败")?;
    migrate_down(&connection, steps)
        .await
        .with_context(|| format!("回滚 {} 个迁移失败", steps))?;
    connection.close().await.context("关闭迁移连接失败")?;
    info!("已回滚 {} 个迁移", steps);
    Ok(())
}
