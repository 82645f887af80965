use tracing::{error, info, Instrument};

use shopcart::app_system::{setup_tracing, CartSystem};
use shopcart::config::CartConfig;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting application with cart system");

    let config = CartConfig::from_env();
    let system = CartSystem::start(config).await.map_err(|e| e.to_string())?;

    // Surface failure notifications the way a UI toast layer would.
    let mut notifications = system.notifications();
    tokio::spawn(async move {
        while let Ok(message) = notifications.recv().await {
            error!(%message, "Cart notification");
        }
    });

    let span = tracing::info_span!("demo_scenario");
    async {
        info!("Adding product 1 twice, adjusting its amount, then removing it");

        let cart = system
            .cart_client
            .add_product(1)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = cart.len(), "After first add");

        let cart = system
            .cart_client
            .add_product(1)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = cart.len(), "After second add");

        let cart = system
            .cart_client
            .update_product_amount(1, 5)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = cart.len(), "After amount update");

        let cart = system
            .cart_client
            .remove_product(1)
            .await
            .map_err(|e| e.to_string())?;
        info!(items = cart.len(), "After removal");

        Ok::<(), String>(())
    }
    .instrument(span)
    .await?;

    // Without a storefront API running, each step above fails gracefully:
    // a notification fires and the cart stays as it was.
    let cart = system
        .cart_client
        .get_cart()
        .await
        .map_err(|e| e.to_string())?;
    info!(items = cart.len(), "Final cart");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
