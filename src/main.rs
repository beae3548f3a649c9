#![forbid(unsafe_code)]

use xcbuddy::cli::CommandRegistry;
use xcbuddy::config::Settings;
use xcbuddy::logging;

fn main() {
    let settings = Settings::from_env();
    if let Err(error) = logging::init(settings.log_level, settings.color) {
        eprintln!("Failed to initialize logging: {}", error);
    }

    let registry = CommandRegistry::with_settings(settings);
    if let Err(error) = registry.run() {
        error.exit();
    }
}
