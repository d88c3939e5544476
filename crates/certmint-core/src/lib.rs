// SPDX-License-Identifier: MIT
//
// certmint-core — Domain types, validation, and error definitions shared
// across all certmint crates.

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

pub use config::AppConfig;
pub use error::{CertmintError, Result};
pub use types::*;
pub use validate::validate_request;
