pub mod config;
pub mod gestures;
pub mod info;
