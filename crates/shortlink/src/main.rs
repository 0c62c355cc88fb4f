mod config;
mod database;
mod error;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use crate::config::{Args, Command, Config};
use crate::database::MigrationState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logger(&args.log_level)?;

    let config = Config::from_args(&args)?;
    info!("数据库：{}", config.database.display_name());

    match args.command {
        Command::Up => {
            let connection = database::setup_database(&config).await?;
            report_status(&database::migration_status(&connection).await?);
            connection.close().await.context("关闭数据库连接失败")?;
        }
        Command::Down { steps } => {
            database::rollback_database(&config, steps).await?;
        }
        Command::Status => {
            let connection = database::connect(&config).await?;
            report_status(&database::migration_status(&connection).await?);
            if !database::url_table_exists(&connection).await? {
                warn!("url 表不存在");
            }
            connection.close().await.context("关闭数据库连接失败")?;
        }
    }
    Ok(())
}

fn report_status(states: &[MigrationState]) {
    for state in states {
        let mark = if state.applied { "已应用" } else { "未应用" };
        info!("{} {}", mark, state.name);
    }
}
