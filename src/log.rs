use std::fs::File;

use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};

#[used]
#[cfg_attr(target_os = "linux", unsafe(link_section = ".init_array"))]
pub static INITIALIZE: extern "C" fn() = hmacshim_log_init;

fn level_from_env() -> LevelFilter {
    match std::env::var("HMACSHIM_TRACE_LEVEL") {
        Err(_) => LevelFilter::Error,
        Ok(l) => match l.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Trace,
        },
    }
}

/// Initializes a simple logger for tracing purposes based on the values of
/// the environment variable HMACSHIM_TRACE:
/// - stdout -> logs to standard output
/// - file -> any other value is interpreted as a file name to log into
/// - NOT PRESENT -> No tracing is initialized
/// If the logger initialization encounters an error, (for example the log
/// file can't be opened) no tracing is available and no error is reported.
///
/// Additionally the log level can be selected with the environment variable
/// HMACSHIM_TRACE_LEVEL
/// It defaults to LevelFilter::Error.
/// Valid values are: off, error, warn, info, debug, trace.
/// Any incorrect value triggers the highest logging level: LevelFilter::Trace

#[unsafe(no_mangle)]
pub extern "C" fn hmacshim_log_init() {
    let level = level_from_env();
    match std::env::var("HMACSHIM_TRACE") {
        Err(_) => return,
        Ok(t) => match t.as_str() {
            "stdout" => {
                let _ = SimpleLogger::init(level, Config::default());
            }
            file_name => {
                let file = match File::create(file_name) {
                    Ok(w) => w,
                    Err(_) => return,
                };
                let _ = WriteLogger::init(level, Config::default(), file);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_level_from_env() {
        std::env::set_var("HMACSHIM_TRACE_LEVEL", "warn");
        assert_eq!(level_from_env(), LevelFilter::Warn);
        std::env::set_var("HMACSHIM_TRACE_LEVEL", "bogus");
        assert_eq!(level_from_env(), LevelFilter::Trace);
        std::env::remove_var("HMACSHIM_TRACE_LEVEL");
        assert_eq!(level_from_env(), LevelFilter::Error);
    }

    #[test]
    #[serial]
    fn test_init() {
        hmacshim_log_init();
        /* a second call must not fail even if a logger is installed */
        hmacshim_log_init();
    }
}
