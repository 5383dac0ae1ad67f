// SPDX-License-Identifier: MIT

//! Configuration module for commitgate.
//!
//! Handles loading and parsing configuration from TOML files, with
//! defaults that make every hook runnable without any configuration.

pub mod default;
mod loader;
mod schema;

pub use default::example_config;
pub use loader::{find_config_file, load_config, load_config_from, parse_config};
pub use schema::*;
