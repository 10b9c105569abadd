//! Companies and their stores

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CompaniesServiceError;
pub use service::*;
