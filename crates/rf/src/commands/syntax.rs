//! Syntax command implementation.

use rowfilter_rs::help;

use super::{CommandContext, Result};

/// Prints the query language examples and grammar.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        let output = serde_json::json!({
            "examples": help::EXAMPLES,
            "syntax": help::syntax(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", help::full());
    }

    Ok(())
}
