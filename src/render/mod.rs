//! The public rendering surface: configuration and the [`Render`] façade.

pub mod config;
pub mod facade;

pub use config::RenderConfig;
pub use facade::Render;
