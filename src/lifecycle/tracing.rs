//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber for the binary.
//!
//! `RUST_LOG` wins over the configured level, so the usual directives work:
//!
//! ```bash
//! RUST_LOG=info cargo run                        # operations that settled
//! RUST_LOG=debug cargo run                       # every remote request, stale loads
//! RUST_LOG=inventory_sync=debug,remote_store=info cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Remote store**: actor start and shutdown, each request, rejected writes (`record_type`
//!   field)
//! - **Client calls**: one span per `RemoteStore` call with its arguments
//! - **Collection store**: each load/add/update/remove outcome, with `product_id` where one
//!   exists; failures at `warn`
//!
//! With `RUST_LOG=info` a short session reads:
//!
//! ```text
//! INFO Store started record_type="Product"
//! INFO Products loaded count=0
//! INFO Created record_type="Product" id=product_1 size=1
//! INFO Product added product_id=product_1
//! WARN Inventory operation failed operation=Update error=Product not found: product_9
//! ```

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Does nothing if one is already installed.
pub fn setup_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Full => builder.try_init(),
    };
}
