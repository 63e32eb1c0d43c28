use clap::Parser;
use repolint::Cli;
use repolint::cli::{EXIT_CANNOT_RUN, Output};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            // Distinct from "violations found": stderr prefix plus exit code 2
            Output::new(false, quiet).error(&format!("cannot run: {e:#}"));
            ExitCode::from(EXIT_CANNOT_RUN)
        }
    }
}
