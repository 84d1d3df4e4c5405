//! Configuration files.
#![warn(missing_debug_implementations, missing_docs, unreachable_pub)]
#![deny(unused_must_use, rust_2018_idioms)]

pub mod config;

pub use config::{ChainConfig, Config, ConfigError, StaticChainParams};
