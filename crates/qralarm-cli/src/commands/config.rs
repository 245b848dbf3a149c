use clap::Subcommand;

use qralarm_core::storage::{Database, ThemeMode};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective theme ("light" or "dark")
    Theme,
    /// Persist a theme preference
    SetTheme {
        /// "light" or "dark"
        mode: String,
    },
    /// Toggle the persisted theme preference
    ToggleTheme,
}

/// The CLI has no OS color-scheme signal; dark is the system fallback.
const SYSTEM_DEFAULT: ThemeMode = ThemeMode::Dark;

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        ConfigAction::Theme => {
            let mode = ThemeMode::load(&db, SYSTEM_DEFAULT)?;
            println!("{}", serde_json::to_string(&mode)?.trim_matches('"'));
        }
        ConfigAction::SetTheme { mode } => {
            let mode = match mode.as_str() {
                "light" => ThemeMode::Light,
                "dark" => ThemeMode::Dark,
                other => {
                    eprintln!("unknown theme mode: {other} (expected \"light\" or \"dark\")");
                    std::process::exit(1);
                }
            };
            mode.save(&db)?;
            println!("ok");
        }
        ConfigAction::ToggleTheme => {
            let next = ThemeMode::load(&db, SYSTEM_DEFAULT)?.toggled();
            next.save(&db)?;
            println!("{}", serde_json::to_string(&next)?.trim_matches('"'));
        }
    }

    Ok(())
}
