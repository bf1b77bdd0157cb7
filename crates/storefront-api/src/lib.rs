//! In-process API surface for the storefront.
//!
//! Replaces framework-auto dispatch with explicit request/response DTOs and a
//! small dispatch table keyed by resource+verb. An HTTP server would sit in
//! front of [`Api::dispatch`] and translate method+path into a
//! ([`Resource`], [`Verb`]) pair; this crate stops at the typed boundary.

mod config;
mod dispatch;
pub mod dto;

pub use config::StoreConfig;
pub use dispatch::{Api, ApiRequest, ApiResponse, Resource, Verb};
