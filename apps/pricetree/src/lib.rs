//! # pricetree
//!
//! HTTP and CLI adapters around `pricetree-core`.
//!
//! The library target exists so integration tests can build the router
//! without starting a real server.

pub mod api;
pub mod cli;
