// src/main.rs
use std::env;
use std::sync::Arc;

use company_accounting::config::AppConfig;
use company_accounting::{backend, database, telemetry};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None | Some("server") => {
            let db = database::db::connection::get_backend(&config)?;
            tracing::info!(supabase_url = %config.supabase_url, "starting backend server");
            backend::run_server(config.bind_addr, Arc::new(db)).await?;
        }
        Some(other) => anyhow::bail!("unknown command `{other}`; usage: company-accounting [server]"),
    }
    Ok(())
}
