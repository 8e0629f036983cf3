//! Foundation types for the PRISM console.
//!
//! This crate contains the types shared by every PRISM crate: the error
//! enum and the `Result` alias.

pub mod error;

pub use error::{PrismError, Result};
