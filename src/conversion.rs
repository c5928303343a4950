//! Module containing the rescale engine, which converts sample values between the numeric domains a
//! wav file can hold.
//!
//! Integer types use their full range (two's complement for signed types, offset binary for unsigned
//! types) and floating point types use the range ``[-1, 1)``. Converting between two types maps one
//! domain onto the other. The conversions are bit exact for integer pairs and clip, rather than wrap,
//! when a float lies outside of ``[-1, 1)``.
use std::fmt::{Debug, Display};
use std::str::FromStr;

use bytemuck::Pod;
use num_traits::AsPrimitive;

use crate::error::WavmapError;

/// The closed set of numeric element types understood by the rescale engine.
///
/// Only a subset of these can be stored in a wav file, see [`crate::WavType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl SampleType {
    pub const ALL: [SampleType; 10] = [
        SampleType::U8,
        SampleType::I8,
        SampleType::U16,
        SampleType::I16,
        SampleType::U32,
        SampleType::I32,
        SampleType::U64,
        SampleType::I64,
        SampleType::F32,
        SampleType::F64,
    ];

    pub const fn n_bytes(&self) -> usize {
        match self {
            SampleType::U8 | SampleType::I8 => 1,
            SampleType::U16 | SampleType::I16 => 2,
            SampleType::U32 | SampleType::I32 | SampleType::F32 => 4,
            SampleType::U64 | SampleType::I64 | SampleType::F64 => 8,
        }
    }

    pub const fn n_bits(&self) -> u32 {
        (self.n_bytes() * 8) as u32
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, SampleType::F32 | SampleType::F64)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(
            self,
            SampleType::U8 | SampleType::U16 | SampleType::U32 | SampleType::U64
        )
    }
}

impl Display for SampleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SampleType::U8 => "u8",
            SampleType::I8 => "i8",
            SampleType::U16 => "u16",
            SampleType::I16 => "i16",
            SampleType::U32 => "u32",
            SampleType::I32 => "i32",
            SampleType::U64 => "u64",
            SampleType::I64 => "i64",
            SampleType::F32 => "f32",
            SampleType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Parses a type code. Accepts the Rust primitive names (``"i16"``), the long names (``"int16"``,
/// ``"float32"``) and the single character struct codes (``'B'``, ``'h'``, ``'i'``, ``'l'``, ``'f'``,
/// ``'d'`` and their relatives).
impl FromStr for SampleType {
    type Err = WavmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "u8" | "uint8" | "B" => SampleType::U8,
            "i8" | "int8" | "b" => SampleType::I8,
            "u16" | "uint16" | "H" => SampleType::U16,
            "i16" | "int16" | "h" => SampleType::I16,
            "u32" | "uint32" | "I" => SampleType::U32,
            "i32" | "int32" | "i" => SampleType::I32,
            "u64" | "uint64" | "L" | "Q" => SampleType::U64,
            "i64" | "int64" | "l" | "q" => SampleType::I64,
            "f32" | "float32" | "f" => SampleType::F32,
            "f64" | "float64" | "d" => SampleType::F64,
            _ => {
                return Err(WavmapError::UnsupportedEncoding(format!(
                    "unsupported target type {:?}",
                    s
                )))
            }
        })
    }
}

/// A sample lifted out of its storage type, ready to be mapped onto another domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Level {
    /// An integer sample re-centred onto a signed range ``bits`` wide.
    Int { centered: i128, bits: u32 },
    Float(f64),
}

impl Level {
    /// The value as a signed integer ``bits`` wide. Widening shifts left, narrowing shifts right and floats
    /// are scaled and clipped.
    #[inline(always)]
    pub fn to_centered(self, bits: u32) -> i128 {
        match self {
            Level::Int {
                centered,
                bits: src_bits,
            } => {
                if bits >= src_bits {
                    centered << (bits - src_bits)
                } else {
                    centered >> (src_bits - bits)
                }
            }
            Level::Float(value) => {
                let half = 1i128 << (bits - 1);
                // `as` saturates, the clamp keeps +1.0 off the positive edge
                let scaled = (value * half as f64) as i128;
                scaled.clamp(-half, half - 1)
            }
        }
    }

    #[inline(always)]
    pub fn to_float(self) -> f64 {
        match self {
            Level::Int { centered, bits } => centered as f64 / (1u128 << (bits - 1)) as f64,
            Level::Float(value) => value,
        }
    }
}

/// Trait used to indicate that a type is an audio sample and can be treated as such.
pub trait AudioSample:
    Copy
    + Pod
    + Debug
    + Display
    + PartialEq
    + Send
    + Sync
    + 'static
    + AsPrimitive<u8>
    + AsPrimitive<i8>
    + AsPrimitive<u16>
    + AsPrimitive<i16>
    + AsPrimitive<u32>
    + AsPrimitive<i32>
    + AsPrimitive<u64>
    + AsPrimitive<i64>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
{
    const SAMPLE_TYPE: SampleType;

    fn to_level(self) -> Level;

    fn from_level(level: Level) -> Self;

    fn into_buffer(samples: Box<[Self]>) -> SampleBuffer;

    fn from_buffer(buffer: SampleBuffer) -> Option<Box<[Self]>>;

    fn slice_of(buffer: &SampleBuffer) -> Option<&[Self]>;
}

macro_rules! impl_buffer_access {
    ($variant:ident) => {
        #[inline(always)]
        fn into_buffer(samples: Box<[Self]>) -> SampleBuffer {
            SampleBuffer::$variant(samples)
        }

        #[inline(always)]
        fn from_buffer(buffer: SampleBuffer) -> Option<Box<[Self]>> {
            match buffer {
                SampleBuffer::$variant(samples) => Some(samples),
                _ => None,
            }
        }

        #[inline(always)]
        fn slice_of(buffer: &SampleBuffer) -> Option<&[Self]> {
            match buffer {
                SampleBuffer::$variant(samples) => Some(&samples[..]),
                _ => None,
            }
        }
    };
}

macro_rules! impl_signed_sample {
    ($($T:ty => $variant:ident),*) => {
        $(
            impl AudioSample for $T {
                const SAMPLE_TYPE: SampleType = SampleType::$variant;

                #[inline(always)]
                fn to_level(self) -> Level {
                    Level::Int { centered: self as i128, bits: <$T>::BITS }
                }

                #[inline(always)]
                fn from_level(level: Level) -> Self {
                    level.to_centered(<$T>::BITS) as $T
                }

                impl_buffer_access!($variant);
            }
        )*
    };
}

macro_rules! impl_unsigned_sample {
    ($($T:ty => $variant:ident),*) => {
        $(
            impl AudioSample for $T {
                const SAMPLE_TYPE: SampleType = SampleType::$variant;

                #[inline(always)]
                fn to_level(self) -> Level {
                    let offset = 1i128 << (<$T>::BITS - 1);
                    Level::Int { centered: self as i128 - offset, bits: <$T>::BITS }
                }

                #[inline(always)]
                fn from_level(level: Level) -> Self {
                    let offset = 1i128 << (<$T>::BITS - 1);
                    (level.to_centered(<$T>::BITS) + offset) as $T
                }

                impl_buffer_access!($variant);
            }
        )*
    };
}

macro_rules! impl_float_sample {
    ($($T:ty => $variant:ident),*) => {
        $(
            impl AudioSample for $T {
                const SAMPLE_TYPE: SampleType = SampleType::$variant;

                #[inline(always)]
                fn to_level(self) -> Level {
                    Level::Float(self as f64)
                }

                #[inline(always)]
                fn from_level(level: Level) -> Self {
                    level.to_float() as $T
                }

                impl_buffer_access!($variant);
            }
        )*
    };
}

impl_signed_sample!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);
impl_unsigned_sample!(u8 => U8, u16 => U16, u32 => U32, u64 => U64);
impl_float_sample!(f32 => F32, f64 => F64);

/// Rescales a slice of samples into the domain of ``T``. Identical types are copied unchanged.
#[inline(always)]
pub fn rescale_slice<S: AudioSample, T: AudioSample>(samples: &[S]) -> Box<[T]> {
    if S::SAMPLE_TYPE == T::SAMPLE_TYPE {
        return Box::from(bytemuck::cast_slice::<S, T>(samples));
    }
    samples
        .iter()
        .map(|sample| T::from_level(sample.to_level()))
        .collect()
}

/// Casts a slice of samples to ``T`` without any change of range, like an ``as`` cast.
#[inline(always)]
pub fn cast_slice_to<S, T>(samples: &[S]) -> Box<[T]>
where
    S: AudioSample + AsPrimitive<T>,
    T: AudioSample,
{
    samples
        .iter()
        .map(|sample| AsPrimitive::<T>::as_(*sample))
        .collect()
}

macro_rules! convert_into {
    ($target:expr, $convert:ident, $samples:expr) => {
        match $target {
            SampleType::U8 => SampleBuffer::U8($convert::<_, u8>($samples)),
            SampleType::I8 => SampleBuffer::I8($convert::<_, i8>($samples)),
            SampleType::U16 => SampleBuffer::U16($convert::<_, u16>($samples)),
            SampleType::I16 => SampleBuffer::I16($convert::<_, i16>($samples)),
            SampleType::U32 => SampleBuffer::U32($convert::<_, u32>($samples)),
            SampleType::I32 => SampleBuffer::I32($convert::<_, i32>($samples)),
            SampleType::U64 => SampleBuffer::U64($convert::<_, u64>($samples)),
            SampleType::I64 => SampleBuffer::I64($convert::<_, i64>($samples)),
            SampleType::F32 => SampleBuffer::F32($convert::<_, f32>($samples)),
            SampleType::F64 => SampleBuffer::F64($convert::<_, f64>($samples)),
        }
    };
}

/// Rescales a typed slice into a buffer of the runtime chosen ``target`` type.
///
/// This is what [`crate::WavFile::write`] uses when asked to rescale: the caller's samples are mapped from
/// the domain of ``S`` onto the domain of the file's sample type.
///
/// # Examples
///
/// ```no_run
/// use wavmap::conversion::{rescale_into, SampleType};
///
/// let buffer = rescale_into(&[0.5f32, -1.0], SampleType::I16);
/// assert_eq!(buffer.as_slice::<i16>(), Some(&[16384i16, -32768][..]));
/// ```
pub fn rescale_into<S: AudioSample>(samples: &[S], target: SampleType) -> SampleBuffer {
    convert_into!(target, rescale_slice, samples)
}

/// Casts a typed slice into a buffer of the runtime chosen ``target`` type.
///
/// Values keep their numeric value rather than their position in the domain, so ``0.5f32`` becomes ``0i16``.
/// Out of range values saturate for float sources and wrap for integer sources, as ``as`` does.
pub fn cast_into<S: AudioSample>(samples: &[S], target: SampleType) -> SampleBuffer {
    convert_into!(target, cast_slice_to, samples)
}

/// A boxed slice of samples tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleBuffer {
    U8(Box<[u8]>),
    I8(Box<[i8]>),
    U16(Box<[u16]>),
    I16(Box<[i16]>),
    U32(Box<[u32]>),
    I32(Box<[i32]>),
    U64(Box<[u64]>),
    I64(Box<[i64]>),
    F32(Box<[f32]>),
    F64(Box<[f64]>),
}

macro_rules! dispatch {
    ($buffer:expr, $samples:ident => $body:expr) => {
        match $buffer {
            SampleBuffer::U8($samples) => $body,
            SampleBuffer::I8($samples) => $body,
            SampleBuffer::U16($samples) => $body,
            SampleBuffer::I16($samples) => $body,
            SampleBuffer::U32($samples) => $body,
            SampleBuffer::I32($samples) => $body,
            SampleBuffer::U64($samples) => $body,
            SampleBuffer::I64($samples) => $body,
            SampleBuffer::F32($samples) => $body,
            SampleBuffer::F64($samples) => $body,
        }
    };
}

impl SampleBuffer {
    pub fn from_slice<T: AudioSample>(samples: &[T]) -> Self {
        T::into_buffer(Box::from(samples))
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            SampleBuffer::U8(_) => SampleType::U8,
            SampleBuffer::I8(_) => SampleType::I8,
            SampleBuffer::U16(_) => SampleType::U16,
            SampleBuffer::I16(_) => SampleType::I16,
            SampleBuffer::U32(_) => SampleType::U32,
            SampleBuffer::I32(_) => SampleType::I32,
            SampleBuffer::U64(_) => SampleType::U64,
            SampleBuffer::I64(_) => SampleType::I64,
            SampleBuffer::F32(_) => SampleType::F32,
            SampleBuffer::F64(_) => SampleType::F64,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, samples => samples.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The samples in native byte order, which is the on-disk order on little-endian targets.
    pub fn as_bytes(&self) -> &[u8] {
        dispatch!(self, samples => bytemuck::cast_slice(&samples[..]))
    }

    pub fn as_slice<T: AudioSample>(&self) -> Option<&[T]> {
        T::slice_of(self)
    }

    pub fn into_boxed_slice<T: AudioSample>(self) -> Option<Box<[T]>> {
        T::from_buffer(self)
    }

    /// Rescales the buffer into the domain of ``target``.
    pub fn rescale(&self, target: SampleType) -> SampleBuffer {
        if self.sample_type() == target {
            return self.clone();
        }
        dispatch!(self, samples => rescale_into(&samples[..], target))
    }

    /// Casts the buffer to ``target`` without changing the range of the values.
    pub fn cast(&self, target: SampleType) -> SampleBuffer {
        dispatch!(self, samples => cast_into(&samples[..], target))
    }
}

impl<T: AudioSample> From<Vec<T>> for SampleBuffer {
    fn from(samples: Vec<T>) -> Self {
        T::into_buffer(samples.into_boxed_slice())
    }
}

impl<T: AudioSample> From<Box<[T]>> for SampleBuffer {
    fn from(samples: Box<[T]>) -> Self {
        T::into_buffer(samples)
    }
}

/// Returns ``values`` remapped from their own domain into the domain of ``target``.
#[inline(always)]
pub fn rescale(values: &SampleBuffer, target: SampleType) -> SampleBuffer {
    values.rescale(target)
}


#[cfg(feature = "ndarray")]
pub mod ndarray_conversion {
    use crate::conversion::AudioSample;
    use ndarray::{Array2, ArrayView2, ShapeError};

    pub trait IntoNdarray {
        type Target: AudioSample;
        fn into_ndarray(self) -> Result<Array2<Self::Target>, ShapeError>;
    }

    pub trait AsNdarray {
        type Target: AudioSample;
        fn as_ndarray(&self) -> Result<ArrayView2<'_, Self::Target>, ShapeError>;
    }
}
