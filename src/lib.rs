// src/lib.rs

pub mod config;
pub mod core;
pub mod corpus;
pub mod error;
pub mod persistence;
pub mod render;
pub use crate::core::engine::{CrosswordEngine, FillReport};
