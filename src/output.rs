//! Writing generated text to its destination.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn write(&self, text: &str) -> Result<()> {
        match self {
            Destination::Stdout => std::io::stdout()
                .lock()
                .write_all(text.as_bytes())
                .map_err(|err| Error::io("<stdout>", err)),
            Destination::File(path) => write_file(path, text),
        }
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        match value {
            "-" => Destination::Stdout,
            path => Destination::File(PathBuf::from(path)),
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Stdout => write!(f, "<stdout>"),
            Destination::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Overwrites `path`, creating its parent directories first.
pub fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
    }
    std::fs::write(path, text).map_err(|err| Error::io(path, err))
}
