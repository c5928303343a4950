//! Contains the FmtChunk struct, which describes the encoding, channel count and sample rate of a wav file.
use std::fmt::{Display, Formatter};
use std::io::{Read, Seek, SeekFrom};

#[cfg(feature = "colored")]
use colored::Colorize;

use crate::{
    chunks::{Chunk, ChunkRecord, FMT},
    error::WavmapError,
    wav_type::{FormatCode, WavType},
    WavmapResult,
};

pub const FMT_SIZE_BASE_SIZE: usize = 16; // Standard wav file format size
pub const FMT_CB_SIZE: usize = 18; // An extended Format chunk is used for non-PCM data. The cbSize field gives the size of the extension. (0 or 22)
pub const FMT_SIZE_EXTENDED_SIZE: usize = 40; // CB_SIZE + 22 (2 bytes valid_bits_per_sample, 4 byte channel_mask, 16(2+14) byte sub_format)
const FMT_EXTENDED_MIN_SIZE: usize = 26; // everything up to and including the sub-format tag

const EXTENDED_FMT_GUID: [u8; 14] = *b"\x00\x00\x00\x00\x10\x00\x80\x00\x00\xAA\x00\x38\x9B\x71";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FmtChunk {
    /// Format of the audio data. 1 for PCM, 3 for IEEE float, 0xFFFE for extensible.
    pub format: FormatCode,
    /// Number of channels in the audio data.
    pub channels: u16,
    /// Sample rate of the audio data.
    pub sample_rate: u32,
    /// Average number of bytes per second.
    pub byte_rate: u32,
    /// Number of bytes in one frame.
    pub block_align: u16,
    /// Bits per sample of the audio data.
    pub bits_per_sample: u16,
    pub ext_fmt_chunk: ExtFmtChunkInfo,
}

impl FmtChunk {
    /// Constructs a new FmtChunk using the provided format, number of channels, sample rate and bits per sample.
    /// The remaining fields are calculated from these arguments.
    ///
    /// Returns an error when the block align does not fit in 16 bits or the byte rate in 32 bits.
    pub fn new(
        format: FormatCode,
        channels: u16,
        sample_rate: u32,
        bits_per_sample: u16,
        ext_fmt_chunk: ExtFmtChunkInfo,
    ) -> WavmapResult<Self> {
        let block_align = channels.checked_mul(bits_per_sample / 8).ok_or_else(|| {
            WavmapError::InvalidSpec(format!(
                "{} channels of {} bits overflow the block align field",
                channels, bits_per_sample
            ))
        })?;
        let byte_rate = sample_rate
            .checked_mul(block_align as u32)
            .ok_or_else(|| {
                WavmapError::InvalidSpec(format!(
                    "{} Hz with a block align of {} overflows the byte rate field",
                    sample_rate, block_align
                ))
            })?;
        Ok(FmtChunk {
            format,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            ext_fmt_chunk,
        })
    }

    /// Picks the narrowest layout able to describe ``wav_type``. The extensible layout is used for
    /// elements wider than 2 bytes or for more than 2 channels, the plain layout otherwise.
    pub fn for_wav_type(
        wav_type: WavType,
        channels: u16,
        sample_rate: u32,
    ) -> WavmapResult<Self> {
        let encoding = wav_type.format_code();
        let bits = wav_type.n_bits();
        if wav_type.n_bytes() > 2 || channels > 2 {
            let ext = ExtFmtChunkInfo::new(
                CbSize::Extended,
                bits,
                ExtFmtChunkInfo::mask_for(channels),
                encoding,
            );
            FmtChunk::new(
                FormatCode::WAVE_FORMAT_EXTENSIBLE,
                channels,
                sample_rate,
                bits,
                ext,
            )
        } else {
            FmtChunk::new(encoding, channels, sample_rate, bits, ExtFmtChunkInfo::default())
        }
    }

    pub fn is_extended_format(&self) -> bool {
        self.format == FormatCode::WAVE_FORMAT_EXTENSIBLE
    }

    /// The true encoding, looking through the extensible sub-format.
    pub fn format(&self) -> FormatCode {
        match self.is_extended_format() {
            true => self.ext_fmt_chunk.sub_format,
            false => self.format,
        }
    }

    pub fn wav_type(&self) -> WavmapResult<WavType> {
        WavType::try_from((self.format(), self.bits_per_sample))
    }

    /// Decodes a fmt chunk payload.
    pub fn from_bytes(bytes: &[u8]) -> WavmapResult<Self> {
        if bytes.len() < FMT_SIZE_BASE_SIZE {
            return Err(WavmapError::MalformedContainer(format!(
                "fmt chunk is {} bytes, expected at least {}",
                bytes.len(),
                FMT_SIZE_BASE_SIZE
            )));
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        let format = FormatCode::try_from(u16_at(0))?;
        let ext_fmt_chunk = match format {
            FormatCode::WAVE_FORMAT_EXTENSIBLE => {
                if bytes.len() < FMT_EXTENDED_MIN_SIZE {
                    return Err(WavmapError::MalformedContainer(
                        "extensible format but no format extension".into(),
                    ));
                }
                let mut guid = EXTENDED_FMT_GUID;
                if bytes.len() >= FMT_SIZE_EXTENDED_SIZE {
                    guid.copy_from_slice(&bytes[FMT_EXTENDED_MIN_SIZE..FMT_SIZE_EXTENDED_SIZE]);
                }
                ExtFmtChunkInfo {
                    cb_size: CbSize::Extended,
                    valid_bits_per_sample: u16_at(18),
                    channel_mask: u32_at(20),
                    sub_format: FormatCode::try_from(u16_at(24))?,
                    guid,
                }
            }
            _ => ExtFmtChunkInfo::default(),
        };

        Ok(FmtChunk {
            format,
            channels: u16_at(2),
            sample_rate: u32_at(4),
            byte_rate: u32_at(8),
            block_align: u16_at(12),
            bits_per_sample: u16_at(14),
            ext_fmt_chunk,
        })
    }

    /// The chunk payload, 16 bytes for the plain layout and 40 for the extensible one.
    pub fn payload_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FMT_SIZE_EXTENDED_SIZE);
        bytes.extend_from_slice(&self.format.to_le_bytes());
        bytes.extend_from_slice(&self.channels.to_le_bytes());
        bytes.extend_from_slice(&self.sample_rate.to_le_bytes());
        bytes.extend_from_slice(&self.byte_rate.to_le_bytes());
        bytes.extend_from_slice(&self.block_align.to_le_bytes());
        bytes.extend_from_slice(&self.bits_per_sample.to_le_bytes());
        if self.is_extended_format() {
            bytes.extend_from_slice(&self.ext_fmt_chunk.as_bytes());
        }
        bytes
    }
}

impl Chunk for FmtChunk {
    fn id(&self) -> &[u8; 4] {
        &FMT
    }

    fn size(&self) -> u32 {
        match self.is_extended_format() {
            true => FMT_SIZE_EXTENDED_SIZE as u32,
            false => FMT_SIZE_BASE_SIZE as u32,
        }
    }

    fn as_bytes(&self) -> Box<[u8]> {
        let mut bytes = Vec::with_capacity(8 + self.size() as usize);
        bytes.extend_from_slice(&FMT);
        bytes.extend_from_slice(&self.size().to_le_bytes());
        bytes.extend_from_slice(&self.payload_bytes());
        bytes.into_boxed_slice()
    }

    fn from_reader<R: Read + Seek>(reader: &mut R, record: &ChunkRecord) -> WavmapResult<Self>
    where
        Self: Sized,
    {
        // anything past the extensible layout is ignored
        let n_bytes = (record.size as usize).min(FMT_SIZE_EXTENDED_SIZE);
        let mut buf = vec![0; n_bytes];
        reader.seek(SeekFrom::Start(record.offset))?;
        reader.read_exact(&mut buf)?;
        FmtChunk::from_bytes(&buf)
    }
}

#[cfg(feature = "colored")]
impl Display for FmtChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n\t{} {}\n\t{} {}\n\t{} {}\n\t{} {}\n\t{} {}\n\t{} {}",
            "FmtChunk: ".white().bold().underline(),
            "format:".green().bold(),
            self.format().to_string().white(),
            "channels:".green().bold(),
            self.channels.to_string().white(),
            "sample_rate:".green().bold(),
            self.sample_rate.to_string().white(),
            "byte_rate:".green().bold(),
            self.byte_rate.to_string().white(),
            "block_align:".green().bold(),
            self.block_align.to_string().white(),
            "bits_per_sample:".green().bold(),
            self.bits_per_sample.to_string().white()
        )
    }
}

#[cfg(not(feature = "colored"))]
impl Display for FmtChunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FmtChunk: format: {}, channels: {}, sample_rate: {}, byte_rate: {}, block_align: {}, bits_per_sample: {}",
            self.format(),
            self.channels,
            self.sample_rate,
            self.byte_rate,
            self.block_align,
            self.bits_per_sample
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CbSize {
    #[default]
    Base = 0,
    Extended = 22,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtFmtChunkInfo {
    cb_size: CbSize,
    valid_bits_per_sample: u16,
    channel_mask: u32,
    sub_format: FormatCode,
    guid: [u8; 14],
}

impl ExtFmtChunkInfo {
    pub const fn new(
        cb_size: CbSize,
        valid_bits_per_sample: u16,
        channel_mask: u32,
        sub_format: FormatCode,
    ) -> Self {
        ExtFmtChunkInfo {
            cb_size,
            valid_bits_per_sample,
            channel_mask,
            sub_format,
            guid: EXTENDED_FMT_GUID,
        }
    }

    /// One bit per channel, saturating once every bit of the mask is taken.
    pub const fn mask_for(channels: u16) -> u32 {
        if channels >= 32 {
            u32::MAX
        } else {
            (1u32 << channels) - 1
        }
    }

    pub fn cb_size(&self) -> CbSize {
        self.cb_size
    }

    pub fn valid_bits_per_sample(&self) -> u16 {
        self.valid_bits_per_sample
    }

    pub fn channel_mask(&self) -> u32 {
        self.channel_mask
    }

    pub fn sub_format(&self) -> FormatCode {
        self.sub_format
    }

    pub fn guid(&self) -> &[u8; 14] {
        &self.guid
    }

    /// The cbSize field followed by the 22 byte extension.
    pub fn as_bytes(&self) -> [u8; 24] {
        let mut bytes = [0; 24];
        let cb_size = self.cb_size as u16;
        bytes[0..2].copy_from_slice(&cb_size.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.valid_bits_per_sample.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.channel_mask.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.sub_format.to_le_bytes());
        bytes[10..24].copy_from_slice(&self.guid);
        bytes
    }
}

impl Default for ExtFmtChunkInfo {
    fn default() -> Self {
        Self {
            cb_size: CbSize::Base,
            valid_bits_per_sample: (std::mem::size_of::<i16>() * 8) as u16,
            channel_mask: 0,
            sub_format: FormatCode::WAV_FORMAT_PCM,
            guid: EXTENDED_FMT_GUID,
        }
    }
}
