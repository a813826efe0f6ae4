pub mod openapi;

pub use openapi::{parse_document, ApiDocument};
