// src/logging.rs
use log::LevelFilter;
use std::path::Path;

/// Sends log lines to a file so the terminal UI is left alone.
pub fn init_file_logging(path: &Path, level: LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

/// stderr logging for headless commands; `RUST_LOG` overrides `default_filter`.
pub fn init_stderr_logging(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}
