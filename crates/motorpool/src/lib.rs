//! Motorpool - a vehicle catalog service.
//!
//! The library wires the core vehicle model and repository contract from
//! `motorpool_core` to three storage backends and an axum HTTP dispatcher.
//! The binary in `main.rs` is a thin bootstrap around [`app::create_app`].

pub mod app;
pub mod config;
pub mod handlers;
pub mod state;
pub mod storage;
