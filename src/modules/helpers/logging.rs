use fern::Dispatch;
use log::LevelFilter;

/// # parse a log level
/// anything unknown falls back to info
pub fn level_filter(verbosity: &str) -> LevelFilter {
    match verbosity.trim().to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// # setup logging
/// log to stderr and, when given, to a file
///
/// ## Arguments
/// * `verbosity` - the level, e.g. "DEBUG"
/// * `log_file` - path of the log file
pub fn setup_logging(verbosity: &str, log_file: Option<&str>) -> Result<(), fern::InitError> {
    let mut base_config = Dispatch::new()
        .level(level_filter(verbosity))
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        base_config = base_config.chain(fern::log_file(path)?);
    }

    base_config.apply()?;

    Ok(())
}
