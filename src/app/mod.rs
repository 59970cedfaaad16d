pub mod clipboard;
pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod session;
pub mod view_model;

pub use session::Session;
