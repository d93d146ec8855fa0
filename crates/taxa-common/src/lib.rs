//! Taxa Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the taxa workspace.
//!
//! # Overview
//!
//! - **Types**: taxon records, identifiers, and the rank order
//! - **Error Handling**: the shared error type and result alias
//! - **Logging**: one `tracing` setup for every binary
//!
//! # Example
//!
//! ```
//! use taxa_common::types::{Rank, TaxonId};
//!
//! let id: TaxonId = "123".parse().unwrap();
//! assert_eq!(id, TaxonId(123));
//! assert!(Rank::Family.is_at_or_above_genus());
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{Result, TaxaError};
pub use types::{Rank, TaxonId, TaxonKeys, TaxonRecord};
