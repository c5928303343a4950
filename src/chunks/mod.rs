//! The RIFF chunk scanner. A wav file is a ``RIFF`` header followed by a sequence of chunks, each a 4 byte
//! ASCII id, a 4 byte little-endian payload length, the payload and a pad byte when the length is odd.
pub mod fact;
pub mod fmt;

use std::fmt::Display;
use std::io::{Read, Seek, SeekFrom};

pub use crate::chunks::fact::FactChunk;
pub use crate::chunks::fmt::FmtChunk;
use crate::{error::WavmapError, log, WavmapResult};

// 100% necessary to have these chunks
pub const RIFF: [u8; 4] = *b"RIFF";
pub const WAVE: [u8; 4] = *b"WAVE";
pub const DATA: [u8; 4] = *b"data";
pub const FMT: [u8; 4] = *b"fmt ";

// Optional chunks
pub const FACT: [u8; 4] = *b"fact";

/// "RIFF" + total size + "WAVE"
pub const RIFF_HEADER_SIZE: u64 = 12;
/// id + payload length
pub const CHUNK_HEADER_SIZE: u64 = 8;

pub trait Chunk: Display {
    fn id(&self) -> &[u8; 4];
    /// Size of the payload, excluding the id and size fields.
    fn size(&self) -> u32;
    /// The full chunk, id and size fields included.
    fn as_bytes(&self) -> Box<[u8]>;
    fn from_reader<R: Read + Seek>(reader: &mut R, record: &ChunkRecord) -> WavmapResult<Self>
    where
        Self: Sized;
}

pub fn read_chunk<T: Chunk, R: Read + Seek>(
    reader: &mut R,
    record: &ChunkRecord,
) -> WavmapResult<T> {
    T::from_reader(reader, record)
}

/// Wrapper around a 4 byte buffer. Used for storing and displaying/debugging the identifier of a chunk.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChunkIdentifier {
    identifier: [u8; 4],
}

impl ChunkIdentifier {
    pub const fn new(identifier: [u8; 4]) -> Self {
        ChunkIdentifier { identifier }
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.identifier
    }
}

impl From<[u8; 4]> for ChunkIdentifier {
    fn from(identifier: [u8; 4]) -> Self {
        ChunkIdentifier { identifier }
    }
}

impl From<&[u8; 4]> for ChunkIdentifier {
    fn from(identifier: &[u8; 4]) -> Self {
        ChunkIdentifier {
            identifier: *identifier,
        }
    }
}

impl PartialEq<[u8; 4]> for ChunkIdentifier {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.identifier == other
    }
}

impl Display for ChunkIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str: &str = match std::str::from_utf8(&self.identifier) {
            Ok(s) => s,
            Err(_) => "Invalid identifier",
        };
        write!(f, "{:?}", as_str)
    }
}

/// A chunk found while scanning a file: its id, declared payload length and the offset of the payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChunkRecord {
    pub id: ChunkIdentifier,
    pub size: u32,
    pub offset: u64,
}

impl ChunkRecord {
    pub fn new(id: ChunkIdentifier, size: u32, offset: u64) -> Self {
        ChunkRecord { id, size, offset }
    }

    /// Offset of the first byte after the payload and its pad byte.
    pub fn end(&self) -> u64 {
        let size = self.size as u64;
        self.offset + size + (size & 1)
    }
}

impl Display for ChunkRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (offset: {}, size: {})",
            self.id, self.offset, self.size
        )
    }
}

/// Scans the chunks of a RIFF/WAVE stream in file order.
///
/// Unknown chunks are skipped using their declared length. Scanning stops when fewer bytes than a chunk
/// header remain. A chunk whose payload runs past the end of the stream is an error unless it follows the
/// data chunk, in which case scanning stops there.
///
/// Scanning also stops after the data chunk when the RIFF size field ends the file there, as it does for a
/// header that was never patched (size 0) or samples appended after the last patch. The bytes that follow
/// are samples, not chunks.
pub fn scan_chunks<R: Read + Seek>(reader: &mut R) -> WavmapResult<Vec<ChunkRecord>> {
    let stream_len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;

    if stream_len < RIFF_HEADER_SIZE {
        return Err(WavmapError::MalformedContainer(format!(
            "stream of {} bytes is too short for a RIFF header",
            stream_len
        )));
    }

    let mut buf: [u8; 4] = [0; 4];
    reader.read_exact(&mut buf)?;
    if buf != RIFF {
        return Err(WavmapError::MalformedContainer(
            "file does not start with RIFF id".into(),
        ));
    }

    // files whose header was never patched carry 0 here
    reader.read_exact(&mut buf)?;
    let riff_end = u32::from_le_bytes(buf) as u64 + CHUNK_HEADER_SIZE;

    reader.read_exact(&mut buf)?;
    if buf != WAVE {
        return Err(WavmapError::MalformedContainer("not a WAVE file".into()));
    }

    let mut records: Vec<ChunkRecord> = Vec::new();
    let mut seen_fmt = false;
    let mut seen_data = false;
    let mut offset = RIFF_HEADER_SIZE;

    while offset + CHUNK_HEADER_SIZE <= stream_len {
        reader.seek(SeekFrom::Start(offset))?;
        let mut header: [u8; 8] = [0; 8];
        reader.read_exact(&mut header)?;

        let id = ChunkIdentifier::new([header[0], header[1], header[2], header[3]]);
        let size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let record = ChunkRecord::new(id, size, offset + CHUNK_HEADER_SIZE);

        if record.offset + size as u64 > stream_len {
            if seen_data {
                log!(
                    log::Level::Debug,
                    "Stopped scanning at {}: payload runs past the end of the stream",
                    record
                );
                break;
            }
            return Err(WavmapError::MalformedContainer(format!(
                "chunk {} declares {} bytes but only {} remain",
                id,
                size,
                stream_len - record.offset
            )));
        }

        if id == FMT {
            seen_fmt = true;
        } else if id == DATA {
            if !seen_fmt {
                return Err(WavmapError::MalformedContainer(
                    "data chunk before fmt chunk".into(),
                ));
            }
            seen_data = true;
        }

        log!(log::Level::Trace, "Found chunk {}", record);
        records.push(record);
        offset = record.end();

        if id == DATA && riff_end <= offset {
            break;
        }
    }

    Ok(records)
}

/// "RIFF", a zero size placeholder and "WAVE".
pub fn riff_header_bytes() -> [u8; 12] {
    let mut bytes = [0; 12];
    bytes[0..4].copy_from_slice(&RIFF);
    bytes[8..12].copy_from_slice(&WAVE);
    bytes
}

/// "data" and a zero size placeholder.
pub fn data_header_bytes() -> [u8; 8] {
    let mut bytes = [0; 8];
    bytes[0..4].copy_from_slice(&DATA);
    bytes
}
