//! Looks up one account and prints the flattened users as JSON.
//!
//! ```text
//! MACROMEASURES_API_KEY=... cargo run -p macromeasures --example lookup -- jack
//! ```

use macromeasures::{load_settings_from_env, Client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let username = std::env::args().nth(1).unwrap_or_else(|| "jack".to_owned());
    let client = Client::from_settings(load_settings_from_env()?)?;

    tracing::info!(%username, "looking up twitter account");
    let users = client.twitter().by_username(&username).await?.to_users()?;

    println!("{}", serde_json::to_string_pretty(&users)?);
    Ok(())
}
