//! Stable identifiers and small DTOs shared across the cspconf workspace.
//!
//! This crate is intentionally boring:
//! - reserved config keys and markers
//! - header names for the two policy tables
//! - canonical route-key handling

#![forbid(unsafe_code)]

pub mod ids;
pub mod kind;
pub mod route;

pub use kind::PolicyKind;
pub use route::RouteKey;
