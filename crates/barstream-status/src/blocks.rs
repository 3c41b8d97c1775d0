//! Block producers for the status line.

use chrono::{DateTime, TimeZone};

use barstream_core::protocol::{Alignment, Block, StatusLine};

/// Where the kernel publishes load averages.
pub const LOADAVG_PATH: &str = "/proc/loadavg";

/// One-minute load at or above which the load block turns urgent.
const URGENT_LOAD: f64 = 4.0;

const URGENT_COLOR: &str = "#ff5555";

/// Wall clock, shortened to hours and minutes when space is tight.
pub fn clock<Tz>(now: &DateTime<Tz>) -> Block
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    Block::new(now.format("%Y-%m-%d %H:%M:%S").to_string())
        .with_name("clock")
        .with_short_text(now.format("%H:%M").to_string())
}

/// Load averages from the contents of `/proc/loadavg`.
///
/// Returns `None` when the text does not start with three numbers.
pub fn load(loadavg: &str) -> Option<Block> {
    let mut fields = loadavg.split_whitespace();
    let one: f64 = fields.next()?.parse().ok()?;
    let five: f64 = fields.next()?.parse().ok()?;
    let fifteen: f64 = fields.next()?.parse().ok()?;

    let block = Block::new(format!("load {one:.2} {five:.2} {fifteen:.2}"))
        .with_name("load")
        .with_short_text(format!("{one:.2}"))
        .with_min_width("load 00.00 00.00 00.00")
        .with_align(Alignment::Right);

    if one >= URGENT_LOAD {
        Some(block.with_urgent(true).with_color(URGENT_COLOR))
    } else {
        Some(block)
    }
}

/// Read and format the system load, if the platform exposes it.
pub fn read_load() -> Option<Block> {
    std::fs::read_to_string(LOADAVG_PATH)
        .ok()
        .and_then(|text| load(&text))
}

/// Assemble one tick: load (when known) followed by the clock.
pub fn status_line<Tz>(now: &DateTime<Tz>, load: Option<Block>) -> StatusLine
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut line = StatusLine::new();
    if let Some(block) = load {
        line.push(block);
    }
    line.push(clock(now));
    line
}
