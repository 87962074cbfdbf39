pub mod base;
pub mod configs;
pub mod factory;
pub mod gemini;
pub mod groq;
pub mod openai;
pub mod utils;
