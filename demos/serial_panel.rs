//! Line-oriented jog panel on a real serial port.
//!
//! Run with `cargo run --features serial --example serial_panel [config.toml]`.
//! Commands: `up|down|left|right <mm>`, `zero`, `start`, `end`, `status`,
//! `pos`, `clear`, `kill`, `ports`, `quit`.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use stage_jog::{
    list_ports, load_config, DeviceSession, Millimeters, SerialTransport, StatusReport,
    SystemConfig,
};
use tracing::Level;

/// Settle delays on the host thread.
struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => SystemConfig::default(),
    };

    let transport = SerialTransport::open(&config.serial)?;
    let mut session = DeviceSession::open(transport, ThreadDelay, config.session);
    session.start_up()?;

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(action) = words.next() else {
            continue;
        };
        let arg = words.next().unwrap_or("");

        let outcome = match action {
            "up" => Millimeters::parse(arg)
                .map_err(Into::into)
                .and_then(|d| session.move_up(d)),
            "down" => Millimeters::parse(arg)
                .map_err(Into::into)
                .and_then(|d| session.move_down(d)),
            "left" => Millimeters::parse(arg)
                .map_err(Into::into)
                .and_then(|d| session.move_left(d)),
            "right" => Millimeters::parse(arg)
                .map_err(Into::into)
                .and_then(|d| session.move_right(d)),
            "zero" => session.set_zero(),
            "start" => session.start_limit(),
            "end" => session.end_limit(),
            "clear" => session.clear(),
            "kill" => session.kill(),
            "status" => session
                .get_status()
                .map(|s| println!("{}", StatusReport(s))),
            "pos" => session.get_position().map(|p| println!("{}", p)),
            "ports" => {
                for port in list_ports()? {
                    println!("{}", port);
                }
                Ok(())
            }
            "quit" => break,
            other => {
                println!("unknown command: {}", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            println!("error: {}", e);
        }
    }

    session.shut_down()?;
    Ok(())
}
