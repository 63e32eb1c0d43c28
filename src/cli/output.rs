//! Terminal output for repolint
//!
//! Styled status lines in the spirit of lint-staged and similar hook tools.
//! Errors and warnings go to stderr so that stdout stays clean for piping
//! (`repolint languages | ...`, `--format json`).

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a section header with a count, e.g. a rule and its violations
    pub fn section_header(&self, title: &str, count: usize) {
        println!(
            "\n{} {}",
            style(title).bold().red(),
            style(format!("({count})")).dim()
        );
    }

    /// Print an offending path with its reason
    pub fn file_issue(&self, file: &str, reason: &str) {
        println!(
            "  {} {} {}",
            style("•").red(),
            style(file).underlined(),
            style(reason).dim()
        );
    }

    /// Print a plain line, for machine-readable output
    pub fn plain(&self, line: &str) {
        println!("{line}");
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str) {
        if !self.quiet {
            println!("  {} {}", style(key).dim(), value);
        }
    }

    /// Print a final failure summary; shown even in quiet mode
    pub fn failure_summary(&self, message: &str) {
        println!("\n{} {}", style("✖").red().bold(), style(message).red().bold());
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }
}
