//! Store descriptions for the ccstore data-store facade.
//!
//! A [`StoreDescription`] is the declarative input the connection factory in
//! the `ccstore` crate turns into a live store. It is normally produced by an
//! upstream configuration layer, either built in code or loaded from a TOML
//! or JSON document.
//!
//! # Key Types
//!
//! - [`StoreType`] -- which backend a description asks for
//! - [`ProfileRef`] -- opaque credential profile name
//! - [`Parameters`] -- free-form backend parameters (`root`, ...)
//! - [`StoreDescription`] -- the full description

pub mod config;
pub mod description;
pub mod error;

pub use description::{Parameters, ProfileRef, StoreDescription, StoreType};
pub use error::TypeError;
