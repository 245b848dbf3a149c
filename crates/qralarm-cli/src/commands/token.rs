use clap::Subcommand;

use qralarm_core::storage::{Database, TokenStore};

#[derive(Subcommand)]
pub enum TokenAction {
    /// Print this install's stop-key token, minting it on first use.
    /// Render this string as a QR code and keep it where the sink is.
    Show,
}

pub fn run(action: TokenAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        TokenAction::Show => {
            let token = TokenStore::new(&db).ensure()?;
            println!("{token}");
        }
    }

    Ok(())
}
