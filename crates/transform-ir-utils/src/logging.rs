use std::io::Write;

use log::{LevelFilter, SetLoggerError};

#[cfg(test)]
#[path = "logging_test.rs"]
mod test;

/// Initializes env_logger.
/// The format is:
/// `<level>  /path/to/file:<line_number>  <time>  <log_message>`
///
/// Fails if a logger was already installed for this process.
pub fn init_logging(log_level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            let location =
                format!("{}:{}", record.file().unwrap_or("unknown"), record.line().unwrap_or(0),);
            let time_format = time::macros::format_description!("[hour]:[minute]:[second]");
            let now = time::OffsetDateTime::now_local()
                .unwrap_or_else(|_| time::OffsetDateTime::now_utc());
            let formatted_time = now.format(time_format).unwrap_or_else(|_| "??:??:??".into());
            writeln!(buf, "{:7}{:45} {formatted_time} {}", record.level(), location, record.args())
        })
        .try_init()
}
