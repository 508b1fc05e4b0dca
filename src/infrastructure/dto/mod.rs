//! Data transfer objects for the infrastructure layer.

pub mod document;

pub use document::RoomDocument;
