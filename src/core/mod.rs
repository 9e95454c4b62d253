//! Core types shared across modules: user identity and tracker configuration.

pub mod config;
pub mod user;

pub use config::TrackerConfig;
pub use user::UserId;
