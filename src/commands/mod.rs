pub mod dashboard;
pub mod process;
pub mod roi;
pub mod watch;

use console::style;

/// Every failure class ends up here as one styled line on stderr, the CLI
/// counterpart of the transient error notification.
pub fn notify_error(message: &str) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}

pub fn notify_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}
