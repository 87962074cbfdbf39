pub mod errors;
pub mod keys;
pub mod models;
pub mod prompt;
pub mod providers;
