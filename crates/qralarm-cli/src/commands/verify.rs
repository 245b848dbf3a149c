use chrono::Utc;

use qralarm_core::storage::{Database, TokenStore};
use qralarm_core::verify::VerificationGate;
use qralarm_core::Event;

/// Standalone payload check against the stored token; the live stop path
/// is the scan loop inside `run`.
pub fn run(payload: &str) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let token = TokenStore::new(&db).ensure()?;
    let gate = VerificationGate::new(token);

    let event = if gate.verify(payload) {
        Event::VerificationSucceeded { at: Utc::now() }
    } else {
        Event::VerificationFailed { at: Utc::now() }
    };
    println!("{}", serde_json::to_string_pretty(&event)?);

    Ok(())
}
