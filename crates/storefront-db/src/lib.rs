//! In-memory transactional storage for the storefront.
//!
//! [`Db`] is a cheaply cloneable handle over a set of typed tables. Reads run
//! against a shared snapshot; writes go through [`Db::transaction`], which
//! hands the closure an explicit [`Transaction`] over a staged copy of the
//! tables and commits it only if the closure succeeds. A failing closure
//! rolls back by simply dropping the staged copy, so no partial state is ever
//! observable.
//!
//! The typed stores ([`CatalogStore`], [`CartStore`], [`OrderStore`],
//! [`CustomerDirectory`], [`ReviewStore`]) are thin handles over a shared
//! `Db` clone and implement the per-resource contracts.

mod cart;
mod catalog;
mod customer;
mod db;
mod error;
mod order;
mod review;
mod tables;

pub use cart::{CartContents, CartStore};
pub use catalog::CatalogStore;
pub use customer::CustomerDirectory;
pub use db::{Db, Transaction};
pub use error::DbError;
pub use order::{OrderContents, OrderStore};
pub use review::ReviewStore;
pub use tables::Tables;
