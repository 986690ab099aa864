//! Serialization of X-mu objects for export

pub mod json;
