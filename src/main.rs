use inventory_sync::config::InventoryConfig;
use inventory_sync::deletion::DeletionWorkflow;
use inventory_sync::filter::{FilterState, FilteredView, StockMode};
use inventory_sync::form::FormController;
use inventory_sync::lifecycle::{setup_tracing, InventorySystem};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = match std::env::var("INVENTORY_CONFIG") {
        Ok(path) => InventoryConfig::load(&path).map_err(|e| format!("{path}: {e}"))?,
        Err(_) => InventoryConfig::default(),
    };
    setup_tracing(&config.logging);

    info!("Starting inventory session");
    let system = InventorySystem::new(&config);
    let store = &system.store;

    system
        .store
        .load()
        .instrument(tracing::info_span!("initial_load"))
        .await
        .map_err(|e| e.to_string())?;

    // Stock the shelves through the form, like a user would.
    let mut form = FormController::new();
    let span = tracing::info_span!("stocking");
    async {
        for (name, quantity) in [("Hex bolt", "120"), ("Wing nut", "4"), ("Washer", "0")] {
            form.set_name(name);
            form.set_quantity(quantity);
            form.submit(store).await.map_err(|e| e.to_string())?;
        }

        // Rejected before it reaches the remote store.
        form.set_name("   ");
        form.set_quantity("-3");
        if let Err(e) = form.submit(store).await {
            warn!(error = %e, "Form rejected as expected");
        }
        form.cancel_edit();
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Restock the wing nuts.
    if let Some(nut) = store.products().into_iter().find(|p| p.name == "Wing nut") {
        form.start_edit(nut);
        form.set_quantity("40");
        match form.submit(store).await {
            Ok(product) => {
                info!(product_id = %product.id, quantity = product.quantity, "Restocked")
            }
            Err(e) => error!(error = %e, "Restock failed"),
        }
    }

    let mut filter = FilterState::new();
    let mut view = FilteredView::new();
    for mode in [StockMode::All, StockMode::Low, StockMode::OutOfStock] {
        filter.set_mode(mode);
        let names: Vec<&str> = view
            .refresh(store, &filter)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        info!(%mode, ?names, "Filtered view");
    }
    filter.reset();
    filter.set_search("BOLT");
    info!(matches = view.refresh(store, &filter).len(), "Search for 'BOLT'");

    // Clear out whatever is out of stock, with confirmation.
    let mut deletion = DeletionWorkflow::new();
    filter.reset();
    filter.set_mode(StockMode::OutOfStock);
    let candidates = view.refresh(store, &filter).to_vec();
    for product in candidates {
        deletion.request(product);
        match deletion.confirm(store).await {
            Ok(Some(id)) => info!(product_id = %id, "Removed"),
            Ok(None) => {}
            Err(e) => error!(error = %e, "Removal failed"),
        }
    }

    let stats = store.stats();
    info!(
        total = stats.total,
        regular = stats.regular,
        low = stats.low,
        out_of_stock = stats.out_of_stock,
        "Final inventory"
    );
    if let Some(message) = system.notifications().current_success() {
        info!(%message, "Last notification");
    }

    system.shutdown().await?;

    info!("Session completed successfully");
    Ok(())
}
