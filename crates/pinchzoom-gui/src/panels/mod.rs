pub mod footer;
pub mod header;
pub mod viewport;
