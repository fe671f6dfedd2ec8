//! Application service for the account domain.
//!
//! Routes commands to live aggregates and exposes the convenience surface
//! (open, deposit, withdraw, balance). No persistence, no event storage;
//! state lives in memory for the lifetime of the `Teller`.

pub mod teller;

pub use teller::{Teller, TellerError};
