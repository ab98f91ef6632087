use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use error_chain::error_chain;
use fs2::FileExt;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

error_chain! {
    errors {
        CreateDir(path: PathBuf) {
            description("failed to create output directory")
            display("Failed to create output directory `{}`", path.display())
        }
        OpenFile(path: PathBuf) {
            description("failed to open output file")
            display("Failed to open output file `{}`", path.display())
        }
        FileLocked(path: PathBuf) {
            description("Output file is locked, maybe there's another amass-auto instance running")
            display("Output file `{}` is locked, maybe there's another amass-auto instance running", path.display())
        }
    }
    foreign_links {
        IOError(std::io::Error);
    }
}

pub fn generate_output_filename(domain: &str) -> String {
    output_filename_at(domain, &Local::now().naive_local())
}

pub fn output_filename_at(domain: &str, at: &NaiveDateTime) -> String {
    format!("{}_{}.txt", domain, at.format(TIMESTAMP_FORMAT))
}

pub fn ensure_output_dir<P: AsRef<Path>>(dir: P) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).chain_err(|| ErrorKind::CreateDir(dir.to_path_buf()))
}

/// Opens `path` for writing and takes an exclusive lock on it.
///
/// The file is only truncated once the lock is held, so a live run writing
/// the same path keeps its output.
pub fn open_output_file<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .chain_err(|| ErrorKind::OpenFile(path.to_path_buf()))?;
    if file.try_lock_exclusive().is_err() {
        return Err(ErrorKind::FileLocked(path.to_path_buf()).into());
    }
    file.set_len(0)?;
    Ok(file)
}
