//! The interactive client binary.

use clap::Parser;
use contacts::client::ApiClient;
use contacts::config::DEFAULT_SERVER_URL;
use contacts::menu;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Menu-driven client for the contact record store.
#[derive(Parser, Debug)]
#[command(name = "contacts-client", version)]
struct Args {
    /// Base URL of the record store service.
    #[arg(long, default_value = DEFAULT_SERVER_URL)]
    server_url: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let client = ApiClient::new(args.server_url);
    menu::run(&client)?;
    Ok(())
}
