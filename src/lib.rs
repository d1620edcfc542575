//! Headless client core for the Level Up Journey quiz platform.
//!
//! Layers, leaves first: [`config`], [`token`], [`transport`], [`api`],
//! [`repository`], [`state`], [`viewmodel`]. [`app::AppContext`] wires
//! them together.

pub mod api;
pub mod app;
pub mod config;
pub mod logging;
pub mod repository;
pub mod state;
pub mod token;
pub mod transport;
pub mod viewmodel;
