use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};

use qralarm_core::alarm::{CommandChannel, MpscCommandChannel, RingerCommand, RingerService};
use qralarm_core::storage::{Database, TokenStore};
use qralarm_core::verify::{ScanOutcome, VerificationGate};

use crate::common::{BellSink, ConsoleForeground, KvWakeRegistrar, PENDING_TRIGGER_KEY};

/// Host the detached ringer unit in the foreground.
///
/// Waits for the pending trigger, fires the start command over the channel,
/// and treats each stdin line as one decoded QR frame until the correct one
/// stops the alarm. On a device the OS alarm manager and camera play these
/// roles; the command channel and lifecycle are the same.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_inner())
}

async fn run_inner() -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let token = TokenStore::new(&db).ensure()?;
    let Some(trigger_ms) = KvWakeRegistrar::new(&db).pending()? else {
        eprintln!("no pending alarm; set one with `qralarm alarm set`");
        return Ok(());
    };

    let (channel, rx) = MpscCommandChannel::new();
    let service = RingerService::new(BellSink::default(), ConsoleForeground::default());
    let unit = tokio::spawn(service.run(rx, |event| {
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
    }));

    // The OS wake event, reduced to a sleep in this host.
    let wake = channel.clone();
    let wake_task = tokio::spawn(async move {
        let delay_ms = (trigger_ms - Utc::now().timestamp_millis()).max(0) as u64;
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        let _ = wake.dispatch(RingerCommand::Start);
    });

    // Scan flow: each line is one decoded frame, compared byte-for-byte.
    let mut gate = VerificationGate::new(token);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("paste scanned payloads, one per line, to stop the alarm");
    while let Some(line) = lines.next_line().await? {
        match gate.handle_scan(&line, &channel)? {
            ScanOutcome::Matched => {
                eprintln!("correct QR scanned; alarm stopped");
                break;
            }
            ScanOutcome::Mismatch => eprintln!("wrong QR; try again"),
            ScanOutcome::DuplicateFrame => {}
        }
    }

    // The wake event was consumed (or abandoned); clear the registration.
    wake_task.abort();
    db.kv_delete(PENDING_TRIGGER_KEY)?;
    drop(channel);
    unit.await?;
    Ok(())
}
