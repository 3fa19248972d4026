//! Record Gateway
//!
//! Adapter over the hosted record API, organized by entity kind. Owns
//! field-name translation (backend columns vs domain fields) and
//! result/error normalization; nothing above this module sees wire names
//! or raw envelopes.

mod client;
mod envelope;
mod error;

mod activity;
mod company;
mod contact;
mod deal;

pub use client::ApiClient;
pub use error::GatewayError;

// Re-export all public items
pub use activity::*;
pub use company::*;
pub use contact::*;
pub use deal::*;
