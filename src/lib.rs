//! Client library for AI photo generation and text optimization
//!
//! Renders images and rewrites text with Workers AI models, optionally hosting
//! generated images on Cloudinary and otherwise returning them as inline data
//! URLs.

pub mod ai;
pub mod error;
pub mod global;
pub mod media;
pub mod models;
pub mod prompts;
pub mod studio;

pub use error::{Error, ErrorKind, Result};
pub use models::{Config, GeneratePhotoResult, MediaConfig, OptimizeTextResult};
pub use studio::{Studio, StudioServices};
