mod ai;
mod catalog;
mod config;
mod core;
mod logger;
mod services;
mod ui;

use anyhow::Result;
use catalog::Catalog;
use config::Config;
use crate::core::StorefrontAgent;
use ui::ChatApp;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();
    log::info!("🚀 Storefront assistant started");

    let config = Config::default();
    log::info!("📁 Configuration loaded");

    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let agent = StorefrontAgent::from_config(&config, catalog);

    let mut app = ChatApp::new(config, agent);
    app.run().await
}
