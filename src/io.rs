//! Streams a wav file can live in and the modes it can be opened with.
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{WavmapError, WavmapResult};

/// A seekable, readable and writable byte stream holding a wav file.
///
/// Streams backed by a file expose it through ``as_file`` so that reads can be memory mapped.
pub trait WavStream: Read + Write + Seek {
    fn as_file(&self) -> Option<&File> {
        None
    }
}

impl WavStream for File {
    fn as_file(&self) -> Option<&File> {
        Some(self)
    }
}

impl WavStream for Cursor<Vec<u8>> {}
impl WavStream for Cursor<&mut Vec<u8>> {}

impl<T: WavStream + ?Sized> WavStream for &mut T {
    fn as_file(&self) -> Option<&File> {
        (**self).as_file()
    }
}

/// What a handle may do with its stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessMode {
    pub fn can_read(&self) -> bool {
        !matches!(self, AccessMode::WriteOnly)
    }

    pub fn can_write(&self) -> bool {
        !matches!(self, AccessMode::ReadOnly)
    }
}

/// How a wav file on disk is opened.
///
/// | mode | file | access |
/// |------|------|--------|
/// | ``"r"`` | must exist | read only |
/// | ``"r+"`` | must exist | read and append |
/// | ``"w"`` | created or truncated | write only |
/// | ``"w+"`` | created or truncated | read and write |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Read,
    ReadUpdate,
    Write,
    WriteUpdate,
}

impl OpenMode {
    pub fn access_mode(&self) -> AccessMode {
        match self {
            OpenMode::Read => AccessMode::ReadOnly,
            OpenMode::Write => AccessMode::WriteOnly,
            OpenMode::ReadUpdate | OpenMode::WriteUpdate => AccessMode::ReadWrite,
        }
    }

    /// Whether opening with this mode discards any existing contents.
    pub fn truncates(&self) -> bool {
        matches!(self, OpenMode::Write | OpenMode::WriteUpdate)
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> WavmapResult<File> {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => options.read(true),
            OpenMode::ReadUpdate => options.read(true).write(true),
            OpenMode::Write => options.write(true).create(true).truncate(true),
            OpenMode::WriteUpdate => options.read(true).write(true).create(true).truncate(true),
        };
        Ok(options.open(path)?)
    }
}

impl FromStr for OpenMode {
    type Err = WavmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(OpenMode::Read),
            "r+" => Ok(OpenMode::ReadUpdate),
            "w" => Ok(OpenMode::Write),
            "w+" => Ok(OpenMode::WriteUpdate),
            _ => Err(WavmapError::ModeViolation(format!("invalid mode {:?}", s))),
        }
    }
}

impl Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self {
            OpenMode::Read => "r",
            OpenMode::ReadUpdate => "r+",
            OpenMode::Write => "w",
            OpenMode::WriteUpdate => "w+",
        };
        write!(f, "{}", mode)
    }
}
