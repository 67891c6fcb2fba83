//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `speak` - Text-to-speech endpoint returning a WAV file
//! - `voices` - Voice code listing

pub mod api;
pub mod speak;
pub mod voices;

pub use api::health_check;
pub use speak::speak_handler;
pub use voices::list_voices;
