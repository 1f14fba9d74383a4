//! External collaborators: the object catalog and the persistence store.
//!
//! Both are traits so production code can back them with a real database while
//! tests and tooling use the in-memory versions.

pub mod catalog;
pub mod store;

pub use catalog::{Catalog, CatalogEntry, MemoryCatalog};
pub use store::{MemoryStore, SqlValue, Statement, Store};
