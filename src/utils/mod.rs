pub mod clipboard;
pub mod path;
