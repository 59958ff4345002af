use log::{Level, LevelFilter, Metadata, Record};

/// Writes log records to stderr so stdout stays clean for `plan --json`
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            },
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let tag = match record.level() {
                Level::Error => "error",
                Level::Warn => "warning",
                Level::Info => "info",
                Level::Debug => "debug",
                Level::Trace => "trace",
            };
            eprintln!("{}: {}", tag, record.args());
        }
    }

    fn flush(&self) {}
}
