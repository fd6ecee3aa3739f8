use anyhow::Result;
use clap::{Parser, Subcommand};
use configs::AppConfig;
use migration::MigratorTrait;
use models::db::{connect_and_migrate, connect_with_config, DatabaseConfig};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use service::service_context::ServiceContextService;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "manage")]
#[command(about = "Management commands for the todo service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations
    Migrate {
        /// Roll back every migration instead
        #[arg(long)]
        down: bool,
    },
    /// Print the effective configuration with secrets masked
    ShowConfig,
    /// List the tables present in the database
    ShowDbTables,
    /// Reject all non-exempt requests with 503
    ActivateMaintenanceMode,
    /// Resume normal request handling
    DeactivateMaintenanceMode,
}

async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection> {
    connect_with_config(&DatabaseConfig::from_settings(&cfg.database)).await
}

async fn table_names(db: &DatabaseConnection) -> Result<Vec<String>> {
    let backend = db.get_database_backend();
    let sql = match backend {
        DatabaseBackend::Sqlite => "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        DatabaseBackend::Postgres => "SELECT tablename AS name FROM pg_tables WHERE schemaname = 'public' ORDER BY tablename",
        _ => "SELECT table_name AS name FROM information_schema.tables WHERE table_schema = DATABASE()",
    };
    let rows = db.query_all(Statement::from_string(backend, sql.to_string())).await?;
    let mut names = Vec::with_capacity(rows.len());
    for row in rows {
        names.push(row.try_get::<String>("", "name")?);
    }
    Ok(names)
}

async fn execute(cli: Cli, cfg: AppConfig) -> Result<()> {
    match cli.command {
        Command::Migrate { down } => {
            let db = connect(&cfg).await?;
            if down {
                migration::Migrator::down(&db, None).await?;
                info!("migrations rolled back");
            } else {
                migration::Migrator::up(&db, None).await?;
                info!("migrations applied");
            }
        }
        Command::ShowConfig => {
            let mut shown = cfg.clone();
            shown.database.url = cfg.database.redacted_url();
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        Command::ShowDbTables => {
            let db = connect(&cfg).await?;
            for name in table_names(&db).await? {
                println!("{name}");
            }
        }
        Command::ActivateMaintenanceMode => {
            let db = connect_and_migrate(&DatabaseConfig::from_settings(&cfg.database)).await?;
            ServiceContextService::new(db).activate_maintenance_mode().await?;
            println!("maintenance mode activated");
        }
        Command::DeactivateMaintenanceMode => {
            let db = connect_and_migrate(&DatabaseConfig::from_settings(&cfg.database)).await?;
            ServiceContextService::new(db).deactivate_maintenance_mode().await?;
            println!("maintenance mode deactivated");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let cfg = AppConfig::load_and_validate()?;
    common::utils::logging::init_logging(&cfg.service.log_level, false);
    execute(cli, cfg).await
}
