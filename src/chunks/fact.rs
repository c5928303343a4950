//! Contains the FactChunk struct and its implementation.
use std::fmt::{Display, Formatter};
use std::io::{Read, Seek, SeekFrom};

#[cfg(feature = "colored")]
use colored::Colorize;

use crate::{
    chunks::{Chunk, ChunkRecord, FACT},
    error::WavmapError,
    WavmapResult,
};

/// The fact chunk of a wav file. Carries a single field, ``sample_length``, the byte width of one stored element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactChunk {
    pub sample_length: u32,
}

impl FactChunk {
    pub fn new(sample_length: u32) -> Self {
        Self { sample_length }
    }
}

impl Chunk for FactChunk {
    fn id(&self) -> &[u8; 4] {
        &FACT
    }

    fn size(&self) -> u32 {
        4
    }

    fn as_bytes(&self) -> Box<[u8]> {
        let mut buf = [0; 12];
        buf[0..4].copy_from_slice(&FACT);
        buf[4..8].copy_from_slice(&4u32.to_le_bytes());
        buf[8..12].copy_from_slice(&self.sample_length.to_le_bytes());
        Box::new(buf)
    }

    fn from_reader<R: Read + Seek>(reader: &mut R, record: &ChunkRecord) -> WavmapResult<Self>
    where
        Self: Sized,
    {
        if record.size < 4 {
            return Err(WavmapError::MalformedContainer(format!(
                "fact chunk is {} bytes, expected 4",
                record.size
            )));
        }
        reader.seek(SeekFrom::Start(record.offset))?;
        let mut buf = [0; 4];
        reader.read_exact(&mut buf)?;
        Ok(FactChunk::from(buf))
    }
}

impl From<[u8; 4]> for FactChunk {
    fn from(bytes: [u8; 4]) -> Self {
        FactChunk::new(u32::from_le_bytes(bytes))
    }
}

#[cfg(feature = "colored")]
impl Display for FactChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n\t{} {}",
            "FactChunk: ".white().bold().underline(),
            "sample_length:".green().bold(),
            self.sample_length.to_string().white()
        )
    }
}

#[cfg(not(feature = "colored"))]
impl Display for FactChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FactChunk: sample_length: {}", self.sample_length)
    }
}
