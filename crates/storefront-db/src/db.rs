//! Database handle and transaction-scoped handles.

use std::sync::{Arc, RwLock};

use crate::{DbError, Tables};

/// Handle to the in-memory database.
///
/// Cloning is cheap; all clones share the same tables. Writers serialize on
/// an internal lock, which is what gives checkout its ordering guarantee: two
/// transactions against the same cart run one after the other, so the second
/// observes whatever the first committed.
#[derive(Debug, Clone, Default)]
pub struct Db {
    inner: Arc<RwLock<Tables>>,
}

impl Db {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only closure against the current tables.
    pub fn read<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<DbError>,
        F: FnOnce(&Tables) -> Result<R, E>,
    {
        let guard = self.inner.read().map_err(|_| DbError::Poisoned)?;
        f(&guard)
    }

    /// Run a closure inside a transaction.
    ///
    /// The closure receives a [`Transaction`] over a staged copy of the
    /// tables. If it returns `Ok`, the staged copy replaces the shared
    /// tables; if it returns `Err`, the staged copy is dropped and the
    /// pre-transaction state remains untouched. One attempt, no retries.
    pub fn transaction<R, E, F>(&self, f: F) -> Result<R, E>
    where
        E: From<DbError>,
        F: FnOnce(&mut Transaction) -> Result<R, E>,
    {
        let mut guard = self.inner.write().map_err(|_| DbError::Poisoned)?;
        let mut tx = Transaction {
            staged: guard.clone(),
        };
        let value = f(&mut tx)?;
        *guard = tx.staged;
        Ok(value)
    }
}

/// Scoped handle over a transaction's staged tables.
///
/// Exists only inside [`Db::transaction`]; mutations apply to the staged copy
/// and become visible to other handles only on commit.
#[derive(Debug)]
pub struct Transaction {
    staged: Tables,
}

impl Transaction {
    /// The staged tables, read-only.
    pub fn tables(&self) -> &Tables {
        &self.staged
    }

    /// The staged tables, mutable.
    pub fn tables_mut(&mut self) -> &mut Tables {
        &mut self.staged
    }
}
