pub mod charts;
pub(crate) mod common;
pub mod dashboard;
pub mod products;
pub mod purchases;
pub mod sales;
pub mod salespersons;
pub mod targets;
pub mod transfer;
