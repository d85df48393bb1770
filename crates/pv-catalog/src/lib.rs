//! Policy Viewer Catalog
//!
//! Immutable in-memory hierarchy of policy examples with stable addressing.
//!
//! # Core Concepts
//!
//! - [`Catalog`]: Read-only handle over Topic → Subtopic → Section
//! - [`Address`]: Canonical `topic-*` / `subtopic-*` / `section-*` identifiers
//! - [`SectionKind`]: The four fixed text fields of every entry
//!
//! # Example
//!
//! ```rust
//! use pv_catalog::{Address, Catalog, SectionKind, Subtopic, Topic};
//!
//! let catalog = Catalog::load(vec![Topic::new(
//!     "Conversions",
//!     vec![Subtopic::named("2A Conversion").with_code("pd.to_numeric(df['Total'])")],
//! )]);
//!
//! let address: Address = "section-0-0-code".parse().unwrap();
//! assert_eq!(address, Address::section(0, 0, SectionKind::Code));
//! assert_eq!(
//!     catalog.resolve(&address).unwrap().text(),
//!     Some("pd.to_numeric(df['Total'])")
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod address;
pub mod error;
pub mod model;
pub mod store;

// Re-exports
pub use address::{section_label, Address, SectionRef};
pub use error::{AddressError, CatalogError, CatalogResult};
pub use model::{SectionKind, Subtopic, Topic};
pub use store::{Catalog, Resolved};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for catalog access
    pub use crate::{Address, Catalog, CatalogError, SectionKind, SectionRef, Subtopic, Topic};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
