pub mod commands;
pub mod contracts;
pub mod dates;
pub mod engine;
pub mod error;
pub mod migrations;
pub mod records;
pub mod store;
pub mod transfer;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
