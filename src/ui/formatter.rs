//! Pure formatting functions for terminal output.
//!
//! All display logic lives here, separated from user interaction.

use console::Style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("ERROR:"), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", Style::new().green().apply_to("✓"), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", Style::new().yellow().apply_to("→"), message);
}

/// Format and print a warning message.
pub fn display_warning(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().yellow().bold().apply_to("⚠ WARNING:"),
        message
    );
}

/// Echo an executed command or its outcome, dim.
pub fn display_exec(line: &str) {
    println!("{}", Style::new().dim().apply_to(line));
}

/// Print an informational line in cyan.
pub fn display_info(message: &str) {
    println!("{}", Style::new().cyan().apply_to(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_success() {
        // Visual verification test - output is printed to stdout
        display_success("test success");
    }

    #[test]
    fn test_display_status() {
        display_status("test status");
    }

    #[test]
    fn test_display_warning() {
        display_warning("test warning");
    }
}
