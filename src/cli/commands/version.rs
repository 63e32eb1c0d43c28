//! Version command implementation

use crate::cli::CommandContext;
use crate::{PKG_DESCRIPTION, PKG_NAME, VERSION};
use anyhow::Result;
use std::process::ExitCode;

/// Execute the version command
pub fn execute(context: &CommandContext) -> Result<ExitCode> {
    let output = &context.output;

    output.plain(&format!("{PKG_NAME} {VERSION}"));
    output.blank_line();
    output.key_value("Description:", PKG_DESCRIPTION);
    output.key_value("Target:", std::env::consts::ARCH);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
    );

    Ok(ExitCode::SUCCESS)
}
