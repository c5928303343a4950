use std::fmt::Display;

use crate::{conversion::SampleType, WavmapError};

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCode {
    WAV_FORMAT_PCM = 1,
    WAV_FORMAT_IEEE_FLOAT = 3,
    WAVE_FORMAT_EXTENSIBLE = 0xFFFE,
}

impl FormatCode {
    pub const fn to_le_bytes(self) -> [u8; 2] {
        (self as u16).to_le_bytes()
    }
}

impl Display for FormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatCode::WAV_FORMAT_PCM => write!(f, "WAV_FORMAT_PCM"),
            FormatCode::WAV_FORMAT_IEEE_FLOAT => write!(f, "WAV_FORMAT_IEEE_FLOAT"),
            FormatCode::WAVE_FORMAT_EXTENSIBLE => write!(f, "WAVE_FORMAT_EXTENSIBLE"),
        }
    }
}

impl TryFrom<u16> for FormatCode {
    type Error = WavmapError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(FormatCode::WAV_FORMAT_PCM),
            3 => Ok(FormatCode::WAV_FORMAT_IEEE_FLOAT),
            0xFFFE => Ok(FormatCode::WAVE_FORMAT_EXTENSIBLE),
            _ => Err(WavmapError::UnsupportedEncoding(format!(
                "unsupported format: {:#06x}",
                value
            ))),
        }
    }
}

/// The storage element type of a wav file's data chunk.
///
/// 8-bit PCM is offset-binary (unsigned), wider PCM is signed two's complement. All types are little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WavType {
    Pcm8,
    Pcm16,
    Pcm32,
    Pcm64,
    Float32,
    Float64,
}

impl WavType {
    pub const ALL: [WavType; 6] = [
        WavType::Pcm8,
        WavType::Pcm16,
        WavType::Pcm32,
        WavType::Pcm64,
        WavType::Float32,
        WavType::Float64,
    ];

    pub const fn n_bytes(&self) -> usize {
        match self {
            WavType::Pcm8 => 1,
            WavType::Pcm16 => 2,
            WavType::Pcm32 | WavType::Float32 => 4,
            WavType::Pcm64 | WavType::Float64 => 8,
        }
    }

    pub const fn n_bits(&self) -> u16 {
        (self.n_bytes() * 8) as u16
    }

    /// The true encoding of the type, never ``WAVE_FORMAT_EXTENSIBLE``.
    pub const fn format_code(&self) -> FormatCode {
        match self {
            WavType::Float32 | WavType::Float64 => FormatCode::WAV_FORMAT_IEEE_FLOAT,
            _ => FormatCode::WAV_FORMAT_PCM,
        }
    }
}

impl std::fmt::Display for WavType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WavType::Pcm8 => write!(f, "PCM_8"),
            WavType::Pcm16 => write!(f, "PCM_16"),
            WavType::Pcm32 => write!(f, "PCM_32"),
            WavType::Pcm64 => write!(f, "PCM_64"),
            WavType::Float32 => write!(f, "IEEE_FLOAT_32"),
            WavType::Float64 => write!(f, "IEEE_FLOAT_64"),
        }
    }
}

/// Maps the (encoding, bits per sample) pair of a fmt chunk onto a storage type.
/// The encoding must already be resolved through the extensible sub-format.
impl TryFrom<(FormatCode, u16)> for WavType {
    type Error = WavmapError;

    fn try_from(value: (FormatCode, u16)) -> Result<Self, Self::Error> {
        Ok(match value {
            (FormatCode::WAV_FORMAT_PCM, 8) => WavType::Pcm8,
            (FormatCode::WAV_FORMAT_PCM, 16) => WavType::Pcm16,
            (FormatCode::WAV_FORMAT_PCM, 32) => WavType::Pcm32,
            (FormatCode::WAV_FORMAT_PCM, 64) => WavType::Pcm64,
            (FormatCode::WAV_FORMAT_PCM, bits) => {
                return Err(WavmapError::UnsupportedEncoding(format!(
                    "unsupported bit depth for PCM: {}",
                    bits
                )))
            }
            (FormatCode::WAV_FORMAT_IEEE_FLOAT, 32) => WavType::Float32,
            (FormatCode::WAV_FORMAT_IEEE_FLOAT, 64) => WavType::Float64,
            (FormatCode::WAV_FORMAT_IEEE_FLOAT, bits) => {
                return Err(WavmapError::UnsupportedEncoding(format!(
                    "unsupported bit depth for IEEE floats: {}",
                    bits
                )))
            }
            (FormatCode::WAVE_FORMAT_EXTENSIBLE, _) => {
                return Err(WavmapError::UnsupportedEncoding(
                    "extensible format must be resolved through its sub-format".into(),
                ))
            }
        })
    }
}

impl TryFrom<SampleType> for WavType {
    type Error = WavmapError;

    fn try_from(value: SampleType) -> Result<Self, Self::Error> {
        match value {
            SampleType::U8 => Ok(WavType::Pcm8),
            SampleType::I16 => Ok(WavType::Pcm16),
            SampleType::I32 => Ok(WavType::Pcm32),
            SampleType::I64 => Ok(WavType::Pcm64),
            SampleType::F32 => Ok(WavType::Float32),
            SampleType::F64 => Ok(WavType::Float64),
            SampleType::I8 | SampleType::U16 | SampleType::U32 | SampleType::U64 => {
                Err(WavmapError::UnsupportedEncoding(format!(
                    "type {} cannot be stored in this container",
                    value
                )))
            }
        }
    }
}

impl From<WavType> for SampleType {
    fn from(value: WavType) -> Self {
        match value {
            WavType::Pcm8 => SampleType::U8,
            WavType::Pcm16 => SampleType::I16,
            WavType::Pcm32 => SampleType::I32,
            WavType::Pcm64 => SampleType::I64,
            WavType::Float32 => SampleType::F32,
            WavType::Float64 => SampleType::F64,
        }
    }
}
