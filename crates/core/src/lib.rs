//! Domain core for orgboard.
//!
//! Holds the types, status enums, derived-field math, and input validation
//! shared by the database, API, and client crates. Nothing here touches the
//! database or the network.

pub mod error;
pub mod progress;
pub mod status;
pub mod types;
pub mod validation;
