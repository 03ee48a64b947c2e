mod config;
mod error;
mod row;
pub mod store;

pub use config::{MySqlConfig, format_offset, parse_offset};
pub use error::{MySqlDaoError, MySqlResult};
pub use store::MySqlGameStore;
