// Moodbot - Friendly chatbot with emotion detection
// Library exports

pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod logging;
pub mod models;
pub mod patterns;
pub mod pipeline;
pub mod server;
pub mod session;
