//! hosts - parse, list and edit the operating system hosts file.

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod hosts;
pub mod line;
pub mod platform;
pub mod store;

pub use editor::Editor;
pub use error::HostsError;
pub use line::{for_each_line, Line, Record};
pub use store::{FileStore, Store};
