pub mod common;
pub mod config;
pub mod status;
pub mod sync;

pub use common::CommandOptions;
pub use config::Config;
pub use status::Status;
pub use sync::Sync;
