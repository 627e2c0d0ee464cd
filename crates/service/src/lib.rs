//! Core of the places catalog.
//! - `storage` converts between record lists and their JSON snapshot file.
//! - `catalog` owns the in-memory place list and its CRUD rules.

pub mod errors;
pub mod storage;
pub mod catalog;
