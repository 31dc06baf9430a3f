pub mod entry;
pub mod local;
pub mod remote;

pub use entry::{DirEntry, format_size};
