use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write as _},
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use anyhow::Context as _;
use log::{LevelFilter, Log, Metadata, Record};

/// Appends log records to a file.
///
/// The terminal UI owns stdout and stderr while a game runs, so records go to
/// a file instead. Each line is prefixed with the seconds elapsed since the
/// logger was installed.
#[derive(Debug)]
struct FileLogger {
    level: LevelFilter,
    started: Instant,
    writer: Mutex<BufWriter<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // a failed write has nowhere to be reported
        _ = writeln!(
            self.writer(),
            "{:>10.3} {:<5} [{}] {}",
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        _ = self.writer().flush();
    }
}

impl FileLogger {
    /// Locks the writer, recovering it if a thread panicked while logging.
    fn writer(&self) -> MutexGuard<'_, BufWriter<File>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Installs a global logger writing to `path` at `level`.
pub fn init(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    let logger = FileLogger {
        level,
        started: Instant::now(),
        writer: Mutex::new(BufWriter::new(file)),
    };
    log::set_boxed_logger(Box::new(logger)).context("Failed to install logger")?;
    log::set_max_level(level);
    Ok(())
}

/// Flushes buffered records. Called before the process exits.
pub fn flush() {
    log::logger().flush();
}

#[cfg(test)]
mod tests {
    use std::{fs, panic, sync::Arc, thread};

    use log::Level;

    use super::*;

    fn temp_logger(name: &str) -> (FileLogger, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "blockfall-logger-{name}-{}.log",
            std::process::id()
        ));
        let file = File::create(&path).unwrap();
        let logger = FileLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
            writer: Mutex::new(BufWriter::new(file)),
        };
        (logger, path)
    }

    fn log_line(logger: &FileLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("blockfall")
                .args(format_args!("{message}"))
                .build(),
        );
    }

    #[test]
    fn test_filters_by_level() {
        let (logger, path) = temp_logger("level");
        log_line(&logger, Level::Info, "kept");
        log_line(&logger, Level::Trace, "dropped");
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(text.contains("INFO  [blockfall] kept"));
        assert!(!text.contains("dropped"));
    }

    #[test]
    fn test_writes_after_poisoned_lock() {
        let (logger, path) = temp_logger("poison");
        let logger = Arc::new(logger);
        let poisoner = Arc::clone(&logger);
        let result = thread::spawn(move || {
            let _guard = poisoner.writer.lock().unwrap();
            panic::panic_any("poison the writer lock");
        })
        .join();
        assert!(result.is_err());
        assert!(logger.writer.is_poisoned());

        log_line(&logger, Level::Warn, "still written");
        logger.flush();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(text.contains("still written"));
    }
}
