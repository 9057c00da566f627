//! Repository abstractions for data access.

pub mod affiliate;
pub mod product;
pub mod sale;
pub mod supplier;

pub use affiliate::AffiliateRepository;
pub use product::{ProductInput, ProductRepository};
pub use sale::{SaleInput, SaleRepository};
pub use supplier::SupplierRepository;
