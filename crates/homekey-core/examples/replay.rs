//! Replays a recorded key trace through the handler.
//!
//! Usage: `replay <keypad-root> <trace.jsonl>`
//!
//! Each trace line looks like
//! `{"t":1000,"device_name":"gpio-keys","event":{"device_id":3,"scan_code":42,"key_code":3,"action":"Up"}}`.

use homekey_core::clock::ManualClock;
use homekey_core::inject::ChannelSink;
use homekey_core::keypad::ProcKeypad;
use homekey_core::matcher::DeviceTable;
use homekey_core::profile::ProfileRegistry;
use homekey_core::types::KeyEvent;
use homekey_core::KeyHandler;
use serde::Deserialize;
use std::io::{BufRead, BufReader};

#[derive(Deserialize)]
struct TraceLine {
    t: u64,
    device_name: Option<String>,
    event: KeyEvent,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let (Some(root), Some(trace)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: replay <keypad-root> <trace.jsonl>");
    };

    let lines: Vec<TraceLine> = BufReader::new(std::fs::File::open(&trace)?)
        .lines()
        .filter(|l| l.as_ref().map_or(true, |l| !l.trim().is_empty()))
        .map(|l| -> anyhow::Result<TraceLine> { Ok(serde_json::from_str(&l?)?) })
        .collect::<anyhow::Result<_>>()?;

    let mut devices = DeviceTable::new();
    for line in &lines {
        if let Some(name) = &line.device_name {
            devices.insert(line.event.device_id.0, name.clone());
        }
    }

    let clock = ManualClock::new(0);
    let (sink, injected) = ChannelSink::unbounded();
    let registry = ProfileRegistry::load(&ProcKeypad::new(&root));
    let mut handler = KeyHandler::new(registry, devices, clock.clone(), sink);

    for line in &lines {
        clock.set(line.t);
        let outcome = handler.handle(&line.event);
        println!(
            "t={:>6} dev={} sc={} {:?} -> {:?}",
            line.t, line.event.device_id.0, line.event.scan_code, line.event.action, outcome
        );
        for e in injected.try_iter() {
            println!("         injected key_code={} {:?}", e.key_code, e.action);
        }
    }

    Ok(())
}
