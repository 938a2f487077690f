//! Editor-side workspace helpers: a typewriter-style focus-follow scroll
//! controller and the file explorer's context menu, prompts and file
//! operations. The host embeds these behind small traits ([`typewriter::TypewriterHost`],
//! [`explorer::FileService`], [`explorer::ShellIntegration`]) and keeps
//! rendering to itself.

pub mod config;
pub mod explorer;
pub mod typewriter;
pub mod utils;

pub use config::Config;
