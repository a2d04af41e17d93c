//! Shared helpers: decoding, token estimates, paths, text and time formatting.

pub mod encoding;
pub mod paths;
pub mod text;
pub mod time;
pub mod tokens;

pub use encoding::read_text;
pub use paths::sanitize_filename;
pub use tokens::estimate_tokens;
