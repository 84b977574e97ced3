use std::process::ExitCode;

use clap::Parser;
use domain::services::UsersScreen;
use internet_users_console::prompt::TerminalPrompter;
use internet_users_console::session::SessionFileAuth;
use internet_users_console::{logging, App, Cli, CliError, Config};
use remote::HttpUserStore;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let overrides = cli.config_overrides();
    let config = Config::load(&overrides)?;

    logging::init_logging(&config.logging);
    info!(
        base_url = %config.api.base_url,
        "Starting internet users console v{}",
        env!("CARGO_PKG_VERSION")
    );

    let store = HttpUserStore::new(&config.http_config())?;
    let screen = UsersScreen::new(store).with_precedence(config.search_precedence());
    let auth = SessionFileAuth::new(config.session.path.clone());
    let mut app = App::new(screen, Box::new(auth), Box::new(TerminalPrompter));

    let mut stdout = std::io::stdout().lock();
    app.execute(&cli.command, &mut stdout).await.map_err(|e| {
        error!(error = %e, "Command failed");
        e
    })
}
