pub mod genres;
pub mod normalizer;
pub mod pagination;
pub mod providers;
pub mod store;

pub use store::{CatalogStore, OperationKind, OperationStatus};
