//! Request extractors whose rejections use the crate's error envelope.

pub mod json;

pub use json::JsonBody;
