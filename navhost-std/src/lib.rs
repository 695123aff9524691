//! # navhost-std
//!
//! Standard implementations for the navhost request routing engine.
//!
//! This crate provides:
//! - **Registry**: [`HostRegistry`], host name → host router, insertion ordered
//! - **Dispatch**: [`RouterCenter`], first-match-wins scan + interceptor chain
//! - **Resolution**: [`FactoryTable`] and, with the `inventory` feature,
//!   link-time collected factories
//! - **Standard interceptors**: Logging, Tracing, Conditional, closures
//! - **Route tables**: [`TableHostRouter`] (feature `matchit`, on by default)
//! - **Testing**: recording doubles for interceptors and host routers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use navhost_core;

// Modules
pub mod center;
pub mod interceptors;
pub mod registry;
pub mod resolver;
#[cfg(feature = "matchit")]
pub mod table;
pub mod testing;

#[cfg(feature = "inventory")]
pub use inventory;

pub use center::{CenterConfig, RouterCenter, RouterCenterBuilder};
pub use registry::HostRegistry;
pub use resolver::FactoryTable;
#[cfg(feature = "inventory")]
pub use resolver::{HostRegistration, InventoryResolver};
#[cfg(feature = "matchit")]
pub use table::{RouteAction, RouteTableError, TableHostRouter, TableHostRouterBuilder};
