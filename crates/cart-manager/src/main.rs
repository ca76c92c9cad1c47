//! Opens the persisted session cart and logs what is in it.
//!
//! Reads its configuration from the TOML file named by `CART_CONFIG`, or uses the defaults.
//!
//! ```bash
//! RUST_LOG=info CART_CONFIG=cart.toml cargo run -p cart-manager
//! ```

use actor_framework::tracing::setup_tracing;
use cart_manager::config::CartConfig;
use cart_manager::lifecycle::CartSystem;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = match std::env::var("CART_CONFIG") {
        Ok(path) => {
            info!(%path, "Loading configuration");
            CartConfig::from_file(&path).map_err(|e| e.to_string())?
        }
        Err(_) => CartConfig::default(),
    };

    let system = CartSystem::start(&config)
        .await
        .map_err(|e| e.to_string())?;

    let span = info_span!("cart_snapshot", cart_id = %config.cart_key());
    async {
        match system.cart_client.cart().await {
            Ok(cart) => {
                for item in cart.items() {
                    info!(
                        product_id = %item.id(),
                        name = %item.product.name,
                        amount = item.amount,
                        subtotal = item.subtotal(),
                        "Line"
                    );
                }
                info!(
                    size = cart.size(),
                    units = cart.total_units(),
                    total = cart.total(),
                    "Cart loaded"
                );
            }
            Err(e) => warn!(error = %e, "Cart unavailable"),
        }
    }
    .instrument(span)
    .await;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
