use std::str::FromStr;
use std::thread::sleep;
use std::time::Duration;

use padmouse_control::{KeySequence, Performer};

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("Usage: hold_sequence <sequence> [hold_ms]\nExample: hold_sequence Super+Control+h 200");
        std::process::exit(64);
    };

    let hold_ms: u64 = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(200);

    let sequence = match KeySequence::from_str(&input) {
        Ok(sequence) => sequence,
        Err(err) => {
            eprintln!("Failed to parse key sequence '{input}': {err}");
            std::process::exit(2);
        }
    };

    let mut performer = match Performer::new() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Failed to initialize input performer: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = performer.press(&sequence) {
        eprintln!("Failed to press '{sequence}': {err}");
        std::process::exit(1);
    }

    sleep(Duration::from_millis(hold_ms));

    if let Err(err) = performer.release(&sequence) {
        eprintln!("Failed to release '{sequence}': {err}");
        std::process::exit(1);
    }
}
