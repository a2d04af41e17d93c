//! ctx-memory: persistent project context for AI coding assistants
//!
//! Keeps tasks, decisions, learnings and conventions in a `.context/`
//! directory of Markdown files, checks them for drift, and assembles them
//! into token-budgeted packets for LLM prompts.

pub mod cli;
pub mod compact;
pub mod config;
pub mod context;
pub mod domain;
pub mod drift;
pub mod entry;
pub mod error;
pub mod hook;
pub mod loop_script;
pub mod markdown;
pub mod render;
pub mod session;
pub mod sync;
pub mod tasks;
pub mod templates;
pub mod utils;
pub mod watch;
pub mod workspace;
