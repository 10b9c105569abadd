//! Till Domain Concerns

pub mod carts;
pub mod companies;
pub mod orders;
pub mod pricing;
pub mod products;
pub mod stock;
pub mod users;
