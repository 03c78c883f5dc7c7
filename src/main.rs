//! expense-insights - expense dashboard reports from the command line.

use expense_insights::catalog::{self, Catalog};
use expense_insights::cli::{Cli, Command};
use expense_insights::config::{Config, ConnectionConfig};
use expense_insights::db::DatabaseBackend;
use expense_insights::error::{InsightsError, Result};
use expense_insights::logging;
use expense_insights::output;
use expense_insights::report::{ConfigConnector, ReportExecutor};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = cli.connection_for_command(&config)?;
    let backend = connection
        .as_ref()
        .map(|conn| conn.backend)
        .unwrap_or_default();

    match &cli.command {
        Command::List => println!("{}", output::render_catalog(Catalog::all())),
        Command::Sql { report } => println!("{}", Catalog::sql(report, backend)?),
        Command::Check => check_catalog(connection.as_ref())?,
        Command::Run { report, format } => {
            let report = Catalog::get(report)?;
            let executor = executor_for(connection)?;
            let result = executor.run(report.name).await?;
            let format = format.unwrap_or(config.output.format);
            println!("{}", output::render(report, &result, format));
        }
        Command::Dashboard { format } => {
            let executor = executor_for(connection)?;
            let entries = executor.run_all().await;
            let format = format.unwrap_or(config.output.format);
            println!("{}", output::render_dashboard(&entries, format));
            let failed = entries.iter().filter(|(_, r)| r.is_err()).count();
            if failed > 0 {
                return Err(InsightsError::query(format!(
                    "{failed} of {} reports failed",
                    entries.len()
                )));
            }
        }
    }

    Ok(())
}

/// Audits the selected backend, or both when no connection is configured.
fn check_catalog(connection: Option<&ConnectionConfig>) -> Result<()> {
    let backends: Vec<DatabaseBackend> = match connection {
        Some(conn) => vec![conn.backend],
        None => DatabaseBackend::ALL.to_vec(),
    };

    let mut failures = 0;
    for backend in backends {
        let findings = catalog::audit(backend);
        failures += findings.len();
        println!("{}", output::render_audit(backend, &findings));
    }

    if failures > 0 {
        return Err(InsightsError::query(format!(
            "{failures} report statement(s) are not read-only"
        )));
    }
    Ok(())
}

fn executor_for(connection: Option<ConnectionConfig>) -> Result<ReportExecutor> {
    let connection = connection.ok_or_else(|| {
        InsightsError::config(
            "No database connection configured. Pass a connection string, set DATABASE_URL, or add a connection to the config file",
        )
    })?;
    let connector = ConfigConnector::new(connection);
    info!("Connection: {}", connector.config().display_string());
    Ok(ReportExecutor::new(connector))
}
