pub use sea_orm_migration::prelude::*;

mod m20260211_190348_create_url_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260211_190348_create_url_table::Migration)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::{ConnectOptions, Database, DatabaseConnection};

    async fn memory_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        Database::connect(opt).await.unwrap()
    }

    #[tokio::test]
    async fn test_migrator_up_is_idempotent() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();
        // 已记录在 seaql_migrations 中，第二次不会重复建表
        Migrator::up(&db, None).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(manager.has_table("url").await.unwrap());
        assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
        assert_eq!(Migrator::get_applied_migrations(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_migrator_down_removes_table() {
        let db = memory_db().await;
        Migrator::up(&db, None).await.unwrap();
        Migrator::down(&db, Some(1)).await.unwrap();

        let manager = SchemaManager::new(&db);
        assert!(!manager.has_table("url").await.unwrap());
        assert_eq!(Migrator::get_pending_migrations(&db).await.unwrap().len(), 1);
    }
}
