//! Application layer orchestrating the domain.
//!
//! `ListingService` answers catalog searches and `SessionStore` holds the visitor's
//! filters, favorites and comparison list behind an injected `KeyValueStore`.

pub mod listings;
pub mod session;
