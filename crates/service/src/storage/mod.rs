//! Storage abstractions for service layer
//!
//! File-backed snapshot codecs. A codec owns no records; callers hand it
//! the full list on every save.

pub mod json_list_store;

pub use json_list_store::JsonListCodec;
