use anyhow::Result;
use clap::Parser;
use counsel::cli::Cli;
use counsel::logging::init_logging;
use counsel::App;
use counsel_auth::{AuthManager, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new()?;
    let _guard = init_logging(&settings.log_dir()?)?;

    let auth = AuthManager::from_settings(&settings)?;
    tracing::info!(api_url = %settings.api_url, "counsel starting");

    let session = auth.session().clone();
    let app = App::new(auth);
    let result = app.run(cli.command, &mut std::io::stdout()).await;

    if session.is_expired() {
        eprintln!("Your session has expired. Please log in again with `counsel login`.");
    }
    result
}
