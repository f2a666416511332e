pub mod direction;
pub mod engine;
pub mod grid;
pub mod random;
pub mod selector;
pub mod types;
