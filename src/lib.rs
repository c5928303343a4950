//! # wavmap
//!
//! wavmap is a library for reading, writing, appending to and editing WAV audio files in Rust.
//! Samples can be read into memory or memory mapped, including writable maps whose edits reach the file.
//!
//! ## Core Features
//!
//! - **Storage types**: the container types a wav file can hold:
//!   - Integer PCM: `u8`, `i16`, `i32`, `i64`
//!   - Floating point: `f32`, `f64`
//!
//! - **Rescaling**: lossless-as-possible conversion between the domains of every numeric type, unsigned and
//!   signed integers of 8 to 64 bits and floats in `[-1, 1)`.
//!
//! - **Access modes**: files open with `"r"`, `"r+"`, `"w"` or `"w+"`. Update modes append after the existing
//!   data and patch the header sizes on flush.
//!
//! - **Format Support**:
//!   - Standard PCM and IEEE float formats
//!   - Extensible WAV format support
//!   - Multi-channel audio
//!   - FACT chunks
//!
//! - **Optional Features**:
//!   - `ndarray`: Matrix operations via ndarray integration
//!   - `colored`: Enhanced debug output
//!   - `logging`: Detailed operation logging
//!
//! ## Quick Examples
//!
//! ### Reading Audio
//!
//! ```no_run
//! use wavmap::{read, ReadAccess, WavFile};
//!
//! // Quick read with automatic rescaling to f32
//! let (samples, sample_rate) = read::<f32, _>("input.wav")?;
//!
//! // More control over the process
//! let mut wav = WavFile::from_path("input.wav")?;
//! println!("Channels: {}", wav.n_channels());
//! println!("Sample Rate: {}", wav.sample_rate());
//! println!("Duration: {}s", wav.duration());
//!
//! // memory mapped, copy-on-write
//! let samples = wav.read::<i16>(None, 0, ReadAccess::default())?;
//! # Ok::<(), wavmap::WavmapError>(())
//! ```
//!
//! ### Writing and appending
//!
//! ```no_run
//! use wavmap::{SampleType, WavFile, WavSpec};
//!
//! let spec = WavSpec::new(44100, SampleType::I16, 2);
//! let mut wav = WavFile::open("out.wav", "w+", spec)?;
//! wav.write(&[0.5f32, -0.5, 0.25, -0.25], true)?;
//! wav.write(&[0.0f32, 0.0], true)?.flush()?;
//! # Ok::<(), wavmap::WavmapError>(())
//! ```
//!
//! ### Editing in place
//!
//! ```no_run
//! use wavmap::{MapMode, ReadAccess, WavFile, WavSpec};
//!
//! let mut wav = WavFile::open("out.wav", "r+", WavSpec::default())?;
//! let mut samples = wav.read::<i16>(None, 0, ReadAccess::Mapped(MapMode::Writable))?;
//! samples.as_mut_slice()?[0] = 0;
//! samples.flush()?;
//! # Ok::<(), wavmap::WavmapError>(())
//! ```
//!
//! ## Error Handling
//!
//! wavmap uses the `WavmapResult<T>` type alias for operations that can fail:
//!
//! ```no_run
//! # use wavmap::WavmapError;
//! pub type WavmapResult<T> = Result<T, WavmapError>;
//! ```
//!
//! Common error cases include:
//! - Malformed containers (bad magic, chunks out of order, truncated chunks)
//! - Unsupported encodings (24-bit PCM, unknown format tags)
//! - Operations the open mode does not allow
//! - Appending to a file with chunks after its data
//!
pub mod chunks;
pub mod conversion;
pub mod core;
pub mod error;
pub mod header;
pub mod io;
pub mod wav_type;

use std::fs::File;
use std::path::Path;

pub use crate::chunks::{FactChunk, FmtChunk, DATA, FACT, FMT, RIFF, WAVE};
pub use crate::conversion::{rescale, AudioSample, SampleBuffer, SampleType};
pub use crate::core::{wav_spec, MapMode, ReadAccess, Samples, WavFile, WavSpec};
pub use crate::error::{WavmapError, WavmapResult};
pub use crate::header::WavHeader;
pub use crate::io::{AccessMode, OpenMode, WavStream};
pub use crate::wav_type::{FormatCode, WavType};

/// A macro for logging messages if the logging feature is enabled.
#[macro_export]
macro_rules! log {
    ($level:expr, $($arg:tt)+) => {
        #[cfg(feature = "logging")]
        log::log!($level, $($arg)+);
    };
}

/// Opens the wav file at ``path`` with one of the modes ``"r"``, ``"r+"``, ``"w"`` or ``"w+"``.
pub fn open<P: AsRef<Path>>(path: P, mode: &str, spec: WavSpec) -> WavmapResult<WavFile<File>> {
    WavFile::open(path, mode, spec)
}

/// Reads a wav file and returns the samples, rescaled into the domain of ``T``, and the sample rate.
///
/// Throws an error if the file cannot be opened.
///
/// # Examples
///
/// ```no_run
/// use wavmap::{read, Samples};
///
/// let fp = "path/to/wav.wav";
/// // reads the audio data as i16 samples
/// let (samples, sample_rate): (Samples<i16>, u32) = read::<i16, _>(fp).unwrap();
/// // or read the same file as f32 samples
/// let (samples, sample_rate): (Samples<f32>, u32) = read::<f32, _>(fp).unwrap();
/// ```
#[inline(always)]
pub fn read<T: AudioSample, P: AsRef<Path>>(path: P) -> WavmapResult<(Samples<T>, u32)> {
    let mut wav = WavFile::from_path(&path)?;
    let samples = wav.read_rescaled::<T>(None, 0)?;
    log!(
        log::Level::Debug,
        "Read wav file from {}\n{}",
        path.as_ref().display(),
        wav,
    );
    Ok((samples, wav.sample_rate()))
}

/// Writes wav samples to disk, stored as ``T``.
///
/// # Examples
///
/// The code below will generate a wav file from a 1 second, 1-channel sine wave and write it to disk.
/// ```no_run
/// use wavmap::write;
///
/// let sr: u32 = 16000;
/// let samples: Vec<f32> = (0..sr)
///     .map(|x| (x as f32 / sr as f32 * 440.0 * 2.0 * std::f32::consts::PI).sin())
///     .collect();
/// write("./wav.wav", &samples, sr, 1).unwrap();
/// ```
#[inline(always)]
pub fn write<T: AudioSample, P: AsRef<Path>>(
    fp: P,
    samples: &[T],
    sample_rate: u32,
    n_channels: u16,
) -> WavmapResult<()> {
    let spec = WavSpec::new(sample_rate, T::SAMPLE_TYPE, n_channels);
    let mut wav = WavFile::open(&fp, "w", spec)?;
    wav.write(samples, false)?;
    wav.close()?;
    log!(
        log::Level::Debug,
        "Wrote wav file to {}",
        fp.as_ref().display()
    );
    Ok(())
}


#[cfg(feature = "ndarray")]
pub use conversion::ndarray_conversion::{AsNdarray, IntoNdarray};
