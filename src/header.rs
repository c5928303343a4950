///
/// Module containing functions and structs for working with Wav file headers.
///
use std::io::{Read, Seek};

use crate::{
    chunks::{
        data_header_bytes, read_chunk, riff_header_bytes, scan_chunks, Chunk, ChunkRecord,
        FactChunk, FmtChunk, CHUNK_HEADER_SIZE, DATA, FACT, FMT, RIFF_HEADER_SIZE,
    },
    error::{WavmapError, WavmapResult},
    log,
    wav_type::{FormatCode, WavType},
};

/// The parsed or freshly built header of a wav file: the format description, the optional fact chunk and
/// the location of every chunk, the data chunk included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    pub fmt_chunk: FmtChunk,
    pub fact_chunk: Option<FactChunk>,
    wav_type: WavType,
    data: ChunkRecord,
    chunks: Vec<ChunkRecord>,
    trailing_chunk: bool,
}

impl WavHeader {
    /// Creates the header of an empty file storing ``wav_type``. Fails when the channel count and sample rate
    /// overflow the block align or byte rate fields.
    ///
    /// A fact chunk holding the element byte width is emitted when the fmt chunk is not plain PCM,
    /// unless ``write_fact`` forces it one way or the other.
    pub fn new_header(
        wav_type: WavType,
        n_channels: u16,
        sample_rate: u32,
        write_fact: Option<bool>,
    ) -> WavmapResult<Self> {
        let fmt_chunk = FmtChunk::for_wav_type(wav_type, n_channels, sample_rate)?;
        let fact_chunk = match write_fact.unwrap_or(fmt_chunk.format != FormatCode::WAV_FORMAT_PCM) {
            true => Some(FactChunk::new(wav_type.n_bytes() as u32)),
            false => None,
        };

        let mut chunks = Vec::with_capacity(3);
        let mut offset = RIFF_HEADER_SIZE;
        chunks.push(ChunkRecord::new(
            FMT.into(),
            fmt_chunk.size(),
            offset + CHUNK_HEADER_SIZE,
        ));
        offset += CHUNK_HEADER_SIZE + fmt_chunk.size() as u64;
        if let Some(fact) = &fact_chunk {
            chunks.push(ChunkRecord::new(
                FACT.into(),
                fact.size(),
                offset + CHUNK_HEADER_SIZE,
            ));
            offset += CHUNK_HEADER_SIZE + fact.size() as u64;
        }
        let data = ChunkRecord::new(DATA.into(), 0, offset + CHUNK_HEADER_SIZE);
        chunks.push(data);

        Ok(WavHeader {
            fmt_chunk,
            fact_chunk,
            wav_type,
            data,
            chunks,
            trailing_chunk: false,
        })
    }

    /// Serializes the header up to and including the data chunk header. Both size fields are zero
    /// placeholders, patched once samples have been written.
    pub fn as_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data_offset() as usize);
        bytes.extend_from_slice(&riff_header_bytes());
        bytes.extend_from_slice(&self.fmt_chunk.as_bytes());
        if let Some(fact) = &self.fact_chunk {
            bytes.extend_from_slice(&fact.as_bytes());
        }
        bytes.extend_from_slice(&data_header_bytes());
        bytes
    }

    pub fn wav_type(&self) -> WavType {
        self.wav_type
    }

    pub fn n_channels(&self) -> u16 {
        self.fmt_chunk.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.fmt_chunk.sample_rate
    }

    /// Offset of the first sample byte.
    pub fn data_offset(&self) -> u64 {
        self.data.offset
    }

    /// The payload length the data chunk declares.
    pub fn data_size(&self) -> u64 {
        self.data.size as u64
    }

    /// Whether a chunk other than data follows the data chunk, in which case the data cannot grow.
    pub fn has_trailing_chunk(&self) -> bool {
        self.trailing_chunk
    }

    /// Every chunk of the file in file order.
    pub fn chunks(&self) -> &[ChunkRecord] {
        &self.chunks
    }

    pub fn fact(&self) -> Option<&FactChunk> {
        self.fact_chunk.as_ref()
    }
}

/// Reads the header of a wav stream: scans the chunks, decodes fmt and fact and locates data.
/// Mostly for convenience, but can also be used to inspect a wav file without reading the data.
pub fn read_header<R: Read + Seek>(reader: &mut R) -> WavmapResult<WavHeader> {
    let chunks = scan_chunks(reader)?;

    let fmt_record = chunks.iter().find(|c| c.id == FMT);
    let data_idx = chunks.iter().position(|c| c.id == DATA);
    let (fmt_record, data_idx) = match (fmt_record, data_idx) {
        (Some(fmt), Some(idx)) => (*fmt, idx),
        _ => {
            return Err(WavmapError::MalformedContainer(
                "fmt and/or data chunk missing".into(),
            ))
        }
    };

    let fmt_chunk: FmtChunk = read_chunk(reader, &fmt_record)?;
    let wav_type = fmt_chunk.wav_type()?;
    if fmt_chunk.channels == 0 {
        return Err(WavmapError::MalformedContainer(
            "fmt chunk declares zero channels".into(),
        ));
    }

    let fact_chunk = match chunks.iter().find(|c| c.id == FACT) {
        Some(record) => Some(read_chunk::<FactChunk, R>(reader, record)?),
        None => None,
    };

    let data = chunks[data_idx];
    // a fact chunk behind the data is still header, anything else would be overwritten by an append
    let trailing_chunk = chunks[data_idx + 1..]
        .iter()
        .any(|c| c.id != DATA && c.id != FACT);

    log!(
        log::Level::Debug,
        "Read header: {} with {} channels at {} Hz, data {}",
        wav_type,
        fmt_chunk.channels,
        fmt_chunk.sample_rate,
        data
    );

    Ok(WavHeader {
        fmt_chunk,
        fact_chunk,
        wav_type,
        data,
        chunks,
        trailing_chunk,
    })
}

/// One pending header patch: a little-endian u32 written at ``offset``.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeEntry {
    pub offset: u64,
    pub value: u32,
}

/// Tracks the size fields that change as samples are appended: the RIFF total size and the data chunk length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeTable {
    data_offset: u64,
    data_size: u64,
}

impl SizeTable {
    pub const RIFF_SIZE_OFFSET: u64 = 4;

    pub fn new(data_offset: u64, data_size: u64) -> Self {
        SizeTable {
            data_offset,
            data_size,
        }
    }

    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// Grows the data payload by ``n_bytes``. Fails if the RIFF size field could no longer hold the file.
    pub fn record(&mut self, n_bytes: u64) -> WavmapResult<()> {
        let data_size = self.data_size + n_bytes;
        if self.data_offset + data_size - 8 > u32::MAX as u64 {
            return Err(WavmapError::InvalidRange(format!(
                "{} data bytes do not fit in a RIFF container",
                data_size
            )));
        }
        self.data_size = data_size;
        Ok(())
    }

    /// The RIFF size patch followed by the data size patch.
    pub fn entries(&self) -> [SizeEntry; 2] {
        [
            SizeEntry {
                offset: Self::RIFF_SIZE_OFFSET,
                value: (self.data_offset + self.data_size - 8) as u32,
            },
            SizeEntry {
                offset: self.data_offset - 4,
                value: self.data_size as u32,
            },
        ]
    }
}

#[cfg(test)]
mod header_tests {
    use super::*;
    use std::io::Cursor;

    fn with_data(header: &WavHeader, data: &[u8]) -> Vec<u8> {
        let mut bytes = header.as_bytes();
        bytes.extend_from_slice(data);
        let mut sizes = SizeTable::new(header.data_offset(), 0);
        sizes.record(data.len() as u64).unwrap();
        for entry in sizes.entries() {
            let at = entry.offset as usize;
            bytes[at..at + 4].copy_from_slice(&entry.value.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn plain_pcm16_header_is_44_bytes() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 16000, None).unwrap();
        assert!(header.fact().is_none());
        assert_eq!(header.data_offset(), 44);
        let bytes = header.as_bytes();
        assert_eq!(bytes.len(), 44);
        assert_eq!(&bytes[36..40], b"data");
    }

    #[test]
    fn extensible_header_has_fact() {
        let header = WavHeader::new_header(WavType::Float32, 1, 16000, None).unwrap();
        let fact = header.fact().expect("fact chunk");
        assert_eq!(fact.sample_length, 4);
        // 12 + 8 + 40 + 12 + 8
        assert_eq!(header.data_offset(), 80);
        assert_eq!(header.as_bytes().len(), 80);
        assert_eq!(header.chunks().len(), 3);
    }

    #[test]
    fn fact_can_be_forced() {
        let header = WavHeader::new_header(WavType::Pcm16, 2, 8000, Some(true)).unwrap();
        assert!(header.fact().is_some());
        assert_eq!(header.data_offset(), 56);

        let header = WavHeader::new_header(WavType::Float64, 1, 8000, Some(false)).unwrap();
        assert!(header.fact().is_none());
        assert_eq!(header.data_offset(), 68);
    }

    #[test]
    fn written_header_reads_back() {
        for wav_type in WavType::ALL {
            for n_channels in [1u16, 2, 3] {
                let header = WavHeader::new_header(wav_type, n_channels, 22050, None).unwrap();
                let data = vec![0u8; wav_type.n_bytes() * n_channels as usize * 5];
                let bytes = with_data(&header, &data);

                let parsed = read_header(&mut Cursor::new(bytes)).unwrap();
                assert_eq!(parsed.wav_type(), wav_type);
                assert_eq!(parsed.n_channels(), n_channels);
                assert_eq!(parsed.sample_rate(), 22050);
                assert_eq!(parsed.data_offset(), header.data_offset());
                assert_eq!(parsed.data_size(), data.len() as u64);
                assert_eq!(parsed.fmt_chunk, header.fmt_chunk);
                assert!(!parsed.has_trailing_chunk());
            }
        }
    }

    fn with_chunk_after_data(mut bytes: Vec<u8>, id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        bytes.extend_from_slice(id);
        bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        bytes.extend_from_slice(payload);
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
        bytes
    }

    #[test]
    fn trailing_chunk_is_flagged() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let bytes = with_chunk_after_data(with_data(&header, &[0; 4]), b"LIST", &[0, 0]);

        let parsed = read_header(&mut Cursor::new(bytes)).unwrap();
        assert!(parsed.has_trailing_chunk());
        assert_eq!(parsed.chunks().len(), 3);
    }

    #[test]
    fn fact_after_data_is_not_a_trailing_chunk() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let bytes = with_chunk_after_data(with_data(&header, &[0; 4]), b"fact", &2u32.to_le_bytes());

        let parsed = read_header(&mut Cursor::new(bytes)).unwrap();
        assert!(!parsed.has_trailing_chunk());
        assert_eq!(parsed.fact().map(|f| f.sample_length), Some(2));
    }

    #[test]
    fn unpatched_samples_are_not_trailing_chunks() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let mut bytes = header.as_bytes();
        bytes.extend_from_slice(&[0; 32]);

        let parsed = read_header(&mut Cursor::new(bytes)).unwrap();
        assert!(!parsed.has_trailing_chunk());
        assert_eq!(parsed.chunks().len(), 2);
        assert_eq!(parsed.data_size(), 0);
    }

    #[test]
    fn rejects_24_bit() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let mut bytes = with_data(&header, &[0; 6]);
        // bits per sample of the fmt payload
        bytes[34..36].copy_from_slice(&24u16.to_le_bytes());
        match read_header(&mut Cursor::new(bytes)) {
            Err(WavmapError::UnsupportedEncoding(msg)) => {
                assert!(msg.contains("bit depth"), "{}", msg)
            }
            other => panic!("expected an encoding error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_format_tag() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let mut bytes = with_data(&header, &[0; 2]);
        bytes[20..22].copy_from_slice(&0x0055u16.to_le_bytes());
        match read_header(&mut Cursor::new(bytes)) {
            Err(WavmapError::UnsupportedEncoding(msg)) => {
                assert!(msg.contains("unsupported format"), "{}", msg)
            }
            other => panic!("expected an encoding error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_missing_data() {
        let header = WavHeader::new_header(WavType::Pcm16, 1, 8000, None).unwrap();
        let mut bytes = header.as_bytes();
        // drop the data chunk header
        bytes.truncate(36);
        match read_header(&mut Cursor::new(bytes)) {
            Err(WavmapError::MalformedContainer(msg)) => {
                assert!(msg.contains("missing"), "{}", msg)
            }
            other => panic!("expected a malformed container, got {:?}", other),
        }
    }

    #[test]
    fn rejects_short_extensible_fmt() {
        let mut bytes = riff_header_bytes().to_vec();
        let mut fmt = FmtChunk::for_wav_type(WavType::Pcm32, 1, 8000).unwrap().payload_bytes();
        fmt.truncate(20);
        bytes.extend_from_slice(&FMT);
        bytes.extend_from_slice(&20u32.to_le_bytes());
        bytes.extend_from_slice(&fmt);
        bytes.extend_from_slice(&data_header_bytes());
        assert!(matches!(
            read_header(&mut Cursor::new(bytes)),
            Err(WavmapError::MalformedContainer(_))
        ));
    }

    #[test]
    fn outer_tag_follows_layout() {
        let header = WavHeader::new_header(WavType::Pcm8, 2, 8000, None).unwrap();
        assert_eq!(header.fmt_chunk.format, FormatCode::WAV_FORMAT_PCM);
        let header = WavHeader::new_header(WavType::Pcm8, 3, 8000, None).unwrap();
        assert_eq!(header.fmt_chunk.format, FormatCode::WAVE_FORMAT_EXTENSIBLE);
        assert!(header.fact().is_some());
    }

    #[test]
    fn size_table_patches() {
        let mut sizes = SizeTable::new(44, 0);
        sizes.record(100).unwrap();
        sizes.record(20).unwrap();
        assert_eq!(
            sizes.entries(),
            [
                SizeEntry {
                    offset: 4,
                    value: 44 + 120 - 8
                },
                SizeEntry {
                    offset: 40,
                    value: 120
                },
            ]
        );
        assert!(matches!(
            sizes.record(u32::MAX as u64),
            Err(WavmapError::InvalidRange(_))
        ));
        assert_eq!(sizes.data_size(), 120);
    }
}
