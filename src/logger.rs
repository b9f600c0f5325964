use std::fs::File;

use time::{format_description, OffsetDateTime};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

/// Installs a file-writing subscriber. Will panic if the log file cannot be
/// created; an already-installed subscriber wins silently.
pub fn init_logger() {
    let file = File::create(log_file_name()).expect("could not create the game log file");
    let writer = BoxMakeWriter::new(file);
    let offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")
            .expect("valid time format description"),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    let _ = set_global_default(subscriber);
}

fn log_file_name() -> String {
    let format = format_description::parse("game_[year]-[month]-[day]_[hour]:[minute]:[second].log")
        .expect("valid time format description");
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(&format).expect("formattable timestamp")
}
