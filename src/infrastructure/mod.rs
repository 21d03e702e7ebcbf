pub mod config;
pub mod gemini;
pub mod http;
pub mod repositories;
