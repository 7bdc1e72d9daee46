//! Drive every panel action against the in-memory transport.
//!
//! Run with `cargo run --example mock_panel`.

use embedded_hal_mock::eh1::delay::NoopDelay;
use stage_jog::{DeviceSession, Millimeters, MockTransport, SessionConfig, StatusReport};
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let transport = MockTransport::new()
        .with_reply("B")
        .with_reply("-4000")
        .with_reply("1200");
    let mut session = DeviceSession::open(transport, NoopDelay::new(), SessionConfig::default());

    session.start_up()?;
    session.move_left(Millimeters::parse("400")?)?;
    session.move_up(Millimeters(2.5))?;
    session.set_zero()?;

    println!("{}", StatusReport(session.get_status()?));
    println!("{}", session.get_position()?);

    if let Err(e) = session.move_right(Millimeters(f64::NAN)) {
        println!("Rejected: {}", e);
    }

    for command in session.transport().sent() {
        println!("sent: {}", command);
    }

    session.shut_down()?;
    Ok(())
}
