//! Core types for the motorpool project.
//!
//! This crate holds everything the storage backends and the HTTP layer
//! share: the vehicle entity family, the discriminated codec used to move
//! vehicles across serialization boundaries, and the repository contract
//! the backends implement.

pub mod codec;
pub mod storage;
pub mod vehicle;
