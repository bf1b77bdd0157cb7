//! Cart-to-order conversion.
//!
//! [`Checkout`] converts a cart into an order inside a single all-or-nothing
//! transaction: precondition checks, price snapshot, order insertion, and
//! cart deletion either all happen or none do. After a successful commit an
//! [`events::OrderCreated`] notification goes out to registered listeners,
//! best-effort and outside the transaction boundary.

mod checkout;
pub mod events;

pub use checkout::{Checkout, PlacedOrder};
pub use events::{ListenerError, NotificationHub, OrderCreated, OrderLine, OrderListener};
