//! File-backed `tracing` setup.
//!
//! The terminal is owned by the UI, so log lines go to
//! `<state dir>/todo-tui/todo-tui.log` instead of stderr. The file is rotated
//! at startup once it passes a size cap, keeping a fixed number of old files
//! (`todo-tui.log.1` is the newest).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "todo-tui.log";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_ROTATED_FILES: usize = 3;

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("creating {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    rotate(&path, MAX_LOG_FILE_SIZE_BYTES, MAX_ROTATED_FILES)
        .wrap_err_with(|| format!("rotating {}", path.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("opening {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| eyre!("installing log subscriber: {err}"))?;

    Ok(path)
}

/// Shift `path` to `path.1` (and older files up by one) when it has reached
/// `max_bytes`. Files past `keep` are deleted.
fn rotate(path: &Path, max_bytes: u64, keep: usize) -> io::Result<()> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if size < max_bytes {
        return Ok(());
    }
    if keep == 0 {
        return fs::remove_file(path);
    }

    let oldest = rotated(path, keep);
    if oldest.exists() {
        fs::remove_file(&oldest)?;
    }
    for n in (1..keep).rev() {
        let from = rotated(path, n);
        if from.exists() {
            fs::rename(&from, rotated(path, n + 1))?;
        }
    }
    fs::rename(path, rotated(path, 1))
}

fn rotated(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}
