pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod location;
pub mod query;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
