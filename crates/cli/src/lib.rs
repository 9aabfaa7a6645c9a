pub mod commands;
pub mod config;
pub mod logging;
pub mod report;

pub use commands::Explain;
pub use config::Config;
pub use report::ErrorReport;
