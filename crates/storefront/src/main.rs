use std::sync::Arc;

use anyhow::Context;

use sweetshop_auth::{Credential, InMemorySession, Role};
use sweetshop_client::{ClientConfig, HttpInventoryClient};
use sweetshop_storefront::{AdminEditor, Storefront};

const AUTH_TOKEN_VAR: &str = "SWEETSHOP_AUTH_TOKEN";
const ROLE_VAR: &str = "SWEETSHOP_ROLE";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    sweetshop_observability::init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    tracing::info!(api_url = config.base_url(), timeout = ?config.request_timeout(), "starting sweetshop");

    let remote = Arc::new(HttpInventoryClient::new(&config).context("failed to build HTTP client")?);

    let session = Arc::new(InMemorySession::new());
    match std::env::var(AUTH_TOKEN_VAR) {
        Ok(token) if !token.trim().is_empty() => {
            let role = std::env::var(ROLE_VAR).ok().map(Role::new);
            session.sign_in(Credential::new(token.trim()), role);
        }
        _ => tracing::info!("{AUTH_TOKEN_VAR} not set; browsing anonymously"),
    }

    let mut shop = Storefront::new(remote.clone(), session.clone());
    shop.refresh().await.context("failed to load catalog")?;

    let view = shop.view();
    tracing::info!(shown = view.len(), categories = ?shop.category_options(), "catalog view");
    for item in view {
        tracing::info!(
            item_id = %item.id(),
            name = item.name(),
            category = item.category(),
            price = item.price(),
            stock = item.stock(),
            "item"
        );
    }

    if session.state().is_admin() {
        let mut admin = AdminEditor::new(remote, session);
        admin.load().await.context("failed to load admin dashboard")?;
        let stats = admin.stats();
        tracing::info!(
            total_skus = stats.total_skus,
            total_stock = stats.total_stock,
            category_count = stats.category_count,
            low_stock_count = stats.low_stock_count,
            "inventory statistics"
        );
    }

    Ok(())
}
