//! Size-bounded rotating log file

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Path of the `index`-th backup of `path` (`app.log` -> `app.log.1`)
pub fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{index}"));
    PathBuf::from(name)
}

/// Writer for a single log file that rotates once it would exceed `max_bytes`
///
/// Not synchronized; owners wrap it in a mutex so each line write and each
/// rotation happens as one step.
#[derive(Debug)]
pub struct RotatingFileWriter {
    path: PathBuf,
    /// `None` between closing the old file and opening the new one
    file: Option<File>,
    current_size: u64,
    max_bytes: u64,
    backup_count: usize,
}

impl RotatingFileWriter {
    /// Open `path` for appending, picking up its current size
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        let current_size = file.metadata()?.len();

        Ok(Self {
            path,
            file: Some(file),
            current_size,
            max_bytes,
            backup_count,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn backup_count(&self) -> usize {
        self.backup_count
    }

    /// Append one formatted line, rotating first if it would not fit
    ///
    /// A line longer than `max_bytes` still goes into a fresh file on its own.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        let line_len = line.len() as u64;

        if self.current_size > 0 && self.current_size + line_len > self.max_bytes {
            self.rotate()?;
        }

        let file = self.active_file()?;
        file.write_all(line.as_bytes())?;
        self.current_size += line_len;

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Move the active file to `.1`, shift older backups up and start empty
    ///
    /// Backups past `backup_count` are deleted. With `backup_count == 0` the
    /// active file is truncated in place.
    pub fn rotate(&mut self) -> io::Result<()> {
        info!("Rotating log file {:?}", self.path);

        // Close before renaming so this also works where open files are locked
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }

        if self.backup_count == 0 {
            self.file = Some(
                OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&self.path)?,
            );
            self.current_size = 0;
            return Ok(());
        }

        for index in (1..self.backup_count).rev() {
            let src = backup_path(&self.path, index);
            if src.exists() {
                let dst = backup_path(&self.path, index + 1);
                remove_if_exists(&dst)?;
                fs::rename(&src, &dst)?;
            }
        }

        let first = backup_path(&self.path, 1);
        remove_if_exists(&first)?;
        if self.path.exists() {
            fs::rename(&self.path, &first)?;
        }

        self.file = Some(open_append(&self.path)?);
        self.current_size = 0;
        debug!("Started fresh log file {:?}", self.path);

        Ok(())
    }

    /// The open file, reopening it if an earlier rotation failed halfway
    fn active_file(&mut self) -> io::Result<&mut File> {
        if self.file.is_none() {
            let file = open_append(&self.path)?;
            self.current_size = file.metadata()?.len();
            self.file = Some(file);
        }

        // Just populated above
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
