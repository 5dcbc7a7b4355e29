//! # bkup-store: Storage Collaborators
//!
//! Implementations of the `bkup-compliance` collaborator traits:
//!
//! | Type                | Implements   | Backing                           |
//! |---------------------|--------------|-----------------------------------|
//! | [`InMemoryCatalog`] | `CopyStore`  | memory, loadable from YAML/JSON   |
//! | [`MemoryStatusStore`] | `StatusSink` | memory                          |
//! | [`JsonStatusFile`]  | `StatusSink` | memory mirrored to a JSON file    |
//! | [`MemoryAlertLog`]  | `AlertSink`  | memory                            |
//!
//! All of them are safe to share across threads. Locks are `parking_lot`
//! locks and are never held while calling into another collaborator.

pub mod alerts;
pub mod catalog;
pub mod loader;
pub mod status;
pub mod store;

pub use alerts::MemoryAlertLog;
pub use catalog::InMemoryCatalog;
pub use loader::{load_catalog, parse_catalog, CatalogFormat};
pub use status::{JsonStatusFile, MemoryStatusStore};
pub use store::Store;
