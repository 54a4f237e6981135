//! Logger setup.
//!
//! The terminal UI owns stdout/stderr while running, so the game binary logs
//! to a file in the data directory. Helper binaries log to stderr.

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_FILTER: &str = "info";

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

/// Append log lines to `path`. Safe to call more than once; later calls are ignored.
pub fn init_file_logger(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = builder().target(Target::Pipe(Box::new(file))).try_init();
    Ok(())
}

/// Log to stderr.
pub fn init_stderr_logger() {
    let _ = builder().target(Target::Stderr).try_init();
}
