pub mod archive;
pub mod command;
pub mod mysql;
pub mod retention;
pub mod size;
pub mod timestamp;

// Re-export commonly used items
pub use mysql::{DumpClient, MysqlClient};
pub use size::format_size;
