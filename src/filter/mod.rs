//! # Filter Engine
//!
//! Pure projections of the product collection. Nothing in this module mutates its input.
//!
//! - [`filter`] narrows a collection by name search and [`StockMode`], keeping the input order.
//! - [`InventoryStats`] counts stock levels over an unfiltered collection.
//! - [`view`] caches the projection against the store and [`FilterState`] revisions.

pub mod view;

pub use view::*;

use crate::model::{Product, StockLevel};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Which stock levels the filtered view keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockMode {
    /// Every product.
    #[default]
    All,
    /// Products with some stock, but less than the low-stock threshold.
    Low,
    /// Products with no stock at all.
    #[serde(rename = "none")]
    OutOfStock,
}

impl StockMode {
    pub fn admits(self, product: &Product) -> bool {
        match self {
            StockMode::All => true,
            StockMode::Low => product.stock_level() == StockLevel::Low,
            StockMode::OutOfStock => product.stock_level() == StockLevel::OutOfStock,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stock mode '{0}' (expected all, low or none)")]
pub struct ParseStockModeError(String);

impl FromStr for StockMode {
    type Err = ParseStockModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StockMode::All),
            "low" => Ok(StockMode::Low),
            "none" => Ok(StockMode::OutOfStock),
            other => Err(ParseStockModeError(other.to_string())),
        }
    }
}

impl Display for StockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StockMode::All => "all",
            StockMode::Low => "low",
            StockMode::OutOfStock => "none",
        };
        f.write_str(name)
    }
}

/// Products whose name contains `search` (case-insensitively) and whose stock matches `mode`.
///
/// An empty `search` matches every name. Order is preserved.
pub fn filter(products: &[Product], search: &str, mode: StockMode) -> Vec<Product> {
    let needle = search.to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .filter(|p| mode.admits(p))
        .cloned()
        .collect()
}

/// Stock counts over a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total: usize,
    pub regular: usize,
    pub low: usize,
    pub out_of_stock: usize,
}

impl InventoryStats {
    pub fn of(products: &[Product]) -> Self {
        products
            .iter()
            .fold(Self::default(), |mut stats, product| {
                stats.total += 1;
                match product.stock_level() {
                    StockLevel::Regular => stats.regular += 1,
                    StockLevel::Low => stats.low += 1,
                    StockLevel::OutOfStock => stats.out_of_stock += 1,
                }
                stats
            })
    }
}

/// Why a filtered view came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The collection itself is empty.
    NoProducts,
    /// There are products, but none pass the current filters.
    NoMatches,
}

impl EmptyReason {
    /// `None` when the view has something to show.
    pub fn of(collection_len: usize, view_len: usize) -> Option<Self> {
        match (collection_len, view_len) {
            (0, _) => Some(EmptyReason::NoProducts),
            (_, 0) => Some(EmptyReason::NoMatches),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new(5, "Steel Bolt", 0),
            Product::new(4, "Wood Screw", 5),
            Product::new(3, "bolt cutter", 15),
            Product::new(2, "Washer", 9),
            Product::new(1, "BOLT, hex", 1),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_no_filters_returns_collection_unchanged() {
        let products = sample();
        assert_eq!(filter(&products, "", StockMode::All), products);
    }

    #[test]
    fn test_stock_modes_select_levels() {
        let products = vec![
            Product::new(3, "a", 0),
            Product::new(2, "b", 5),
            Product::new(1, "c", 15),
        ];
        assert_eq!(ids(&filter(&products, "", StockMode::Low)), vec![2]);
        assert_eq!(ids(&filter(&products, "", StockMode::OutOfStock)), vec![3]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        assert_eq!(ids(&filter(&sample(), "bOlT", StockMode::All)), vec![5, 3, 1]);
        assert_eq!(ids(&filter(&sample(), "crew", StockMode::All)), vec![4]);
        assert!(filter(&sample(), "nail", StockMode::All).is_empty());
    }

    #[test]
    fn test_search_and_mode_combine() {
        assert_eq!(ids(&filter(&sample(), "bolt", StockMode::Low)), vec![1]);
        assert_eq!(ids(&filter(&sample(), "bolt", StockMode::OutOfStock)), vec![5]);
    }

    #[test]
    fn test_search_text_is_not_trimmed() {
        assert_eq!(ids(&filter(&sample(), " bolt", StockMode::All)), vec![5]);
    }

    #[test]
    fn test_filter_is_deterministic() {
        let products = sample();
        let first = filter(&products, "o", StockMode::Low);
        let second = filter(&products, "o", StockMode::Low);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stock_mode_parsing() {
        assert_eq!("all".parse::<StockMode>(), Ok(StockMode::All));
        assert_eq!("low".parse::<StockMode>(), Ok(StockMode::Low));
        assert_eq!("none".parse::<StockMode>(), Ok(StockMode::OutOfStock));
        assert!("zero".parse::<StockMode>().is_err());
        assert_eq!(StockMode::OutOfStock.to_string(), "none");
    }

    #[test]
    fn test_stats_partition_total() {
        let stats = InventoryStats::of(&sample());
        assert_eq!(
            stats,
            InventoryStats {
                total: 5,
                regular: 1,
                low: 3,
                out_of_stock: 1,
            }
        );
        assert_eq!(stats.regular + stats.low + stats.out_of_stock, stats.total);
    }

    #[test]
    fn test_empty_reason() {
        assert_eq!(EmptyReason::of(0, 0), Some(EmptyReason::NoProducts));
        assert_eq!(EmptyReason::of(3, 0), Some(EmptyReason::NoMatches));
        assert_eq!(EmptyReason::of(3, 1), None);
    }
}
