use std::str::FromStr;

/// prints warnings and errors to stderr, everything else to stdout.
pub struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "{level:<5} {file}:{line} > {text}",
            level = record.level(),
            file = record.file().unwrap_or_else(|| record.target()),
            line = record
                .line()
                .map_or_else(|| "??".to_string(), |line| line.to_string()),
            text = record.args(),
        );
        if record.level() <= log::Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn flush(&self) {}
}

impl Logger {
    /// `RUST_LOG` (if it parses as a level filter) overrides `default_level`.
    pub fn init(default_level: log::LevelFilter) {
        let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref(), default_level);
        // NOTE: the logger may already be installed if the app is run more than once.
        if log::set_logger(&Logger).is_ok() {
            log::set_max_level(level);
        }
    }
}

fn level_from_env(value: Option<&str>, default_level: log::LevelFilter) -> log::LevelFilter {
    value
        .and_then(|value| log::LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(default_level)
}

#[test]
fn test_level_from_env() {
    use log::LevelFilter;

    assert_eq!(level_from_env(None, LevelFilter::Info), LevelFilter::Info);
    assert_eq!(level_from_env(Some("debug"), LevelFilter::Info), LevelFilter::Debug);
    assert_eq!(level_from_env(Some(" TRACE "), LevelFilter::Info), LevelFilter::Trace);
    assert_eq!(level_from_env(Some("off"), LevelFilter::Info), LevelFilter::Off);
    assert_eq!(level_from_env(Some("loud"), LevelFilter::Warn), LevelFilter::Warn);
}
