pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod viewer;
pub mod viewport;
