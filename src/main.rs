//! ctx: persistent project context for AI coding assistants

use anyhow::Result;

fn main() -> Result<()> {
    ctx_memory::cli::run()
}
