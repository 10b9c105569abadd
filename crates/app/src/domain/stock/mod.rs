//! Stock ledger

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub(crate) use repository::PgStockRepository;

pub use errors::StockServiceError;
pub use service::*;
