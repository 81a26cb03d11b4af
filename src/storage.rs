use chrono::Local;
use std::env;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

/// Data directory for this tool: `$XDG_DATA_HOME/nth-prime`, falling back
/// to `~/.local/share/nth-prime`. `None` when neither variable is set.
pub fn get_data_dir() -> Option<PathBuf> {
    let xdg_data_home = env::var("XDG_DATA_HOME")
        .ok()
        .and_then(|path| {
            if path.is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            }
        })
        .or_else(|| {
            env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".local/share"))
        })?;

    Some(xdg_data_home.join("nth-prime"))
}

/// Appends one timestamped line per run to `execution_log.txt` in the data
/// directory.
pub fn log_execution(args: &str, primes_emitted: u64, duration_us: u128) -> io::Result<()> {
    let data_dir = get_data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
    fs::create_dir_all(&data_dir)?;

    let log_path = data_dir.join("execution_log.txt");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    writeln!(
        file,
        "{} | {} | {} primes | {}us",
        timestamp, args, primes_emitted, duration_us
    )?;

    Ok(())
}
