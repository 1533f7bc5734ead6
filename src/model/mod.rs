//! Plain data types shared by every layer: the [`Product`] record, its writable
//! [`ProductFields`], and stock classification.

pub mod product;

pub use product::*;
