//! COM1 sink for the `log` facade
use core::fmt::Write;

use log::{Level, Log, Metadata, Record};
use spin::Mutex;
use uart_16550::SerialPort;

pub static SERIAL: Mutex<SerialPort> = Mutex::new(unsafe { SerialPort::new(0x3F8) });

/// Writes every enabled record to [`SERIAL`] with interrupts held off
pub struct SerialLogger {
    level: Level,
}

impl SerialLogger {
    pub const fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Log for SerialLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        x86_64::instructions::interrupts::without_interrupts(|| {
            let mut serial = SERIAL.lock();
            let _ = writeln!(serial, "[{}] {}: {}", record.level(), record.target(), record.args());
        });
    }

    fn flush(&self) {}
}

static INFO: SerialLogger = SerialLogger::new(Level::Info);
static DEBUG: SerialLogger = SerialLogger::new(Level::Debug);
static TRACE: SerialLogger = SerialLogger::new(Level::Trace);
static WARN: SerialLogger = SerialLogger::new(Level::Warn);
static ERROR: SerialLogger = SerialLogger::new(Level::Error);

/// Bring up COM1 and install the serial logger at `level`.
/// Fails if a logger is already installed.
pub fn init_logger(level: Level) -> Result<(), log::SetLoggerError> {
    let logger: &'static SerialLogger = match level {
        Level::Error => &ERROR,
        Level::Warn => &WARN,
        Level::Info => &INFO,
        Level::Debug => &DEBUG,
        Level::Trace => &TRACE,
    };
    log::set_logger(logger)?;
    SERIAL.lock().init();
    log::set_max_level(level.to_level_filter());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::MetadataBuilder;

    #[test]
    fn test_logger_filters_by_level() {
        let logger = SerialLogger::new(Level::Warn);
        let warn = MetadataBuilder::new().level(Level::Warn).build();
        let info = MetadataBuilder::new().level(Level::Info).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&info));
    }
}
