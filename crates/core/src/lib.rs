//! Vatrc Core - Shared types library.
//!
//! This crate provides the common types used across the reverse charge
//! workspace:
//! - `checkout` - Evaluation hooks, VIES client, and configuration
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere, including inside host
//! platforms that never touch the VIES registry.
//!
//! # Modules
//!
//! - [`types`] - Country codes, money and taxed-money types, VATIN parsing,
//!   and the checkout metadata map

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
