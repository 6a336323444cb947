pub mod config;
pub mod logging;
pub mod parser;
pub mod report;
pub mod version;
