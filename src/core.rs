/// Module contains the core structs, ``WavFile`` and ``Samples`` for working with wav files.
use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::slice::ChunksExact;
use std::str::FromStr;

use bytemuck::{cast_slice, cast_slice_mut, Zeroable};
use memmap2::{Mmap, MmapMut, MmapOptions};

use crate::chunks::FmtChunk;
use crate::conversion::{cast_into, rescale_into, rescale_slice, AudioSample, SampleType};
use crate::error::{WavmapError, WavmapResult};
use crate::header::{read_header, SizeTable, WavHeader};
use crate::io::{AccessMode, OpenMode, WavStream};
use crate::log;
use crate::wav_type::WavType;

/// The parameters of a new wav file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Frames per second.
    pub sample_rate: u32,
    /// The type each sample is stored as. Must be one a wav file can hold.
    pub sample_type: SampleType,
    /// Number of interleaved channels per frame.
    pub n_channels: u16,
    /// Forces the fact chunk on or off. ``None`` writes it for every non-PCM fmt chunk.
    pub write_fact: Option<bool>,
}

impl Default for WavSpec {
    fn default() -> Self {
        WavSpec {
            sample_rate: 20000,
            sample_type: SampleType::I16,
            n_channels: 1,
            write_fact: None,
        }
    }
}

impl WavSpec {
    /// Constructs a new WavSpec. The fact chunk is written only where the format needs one.
    pub fn new(sample_rate: u32, sample_type: SampleType, n_channels: u16) -> Self {
        WavSpec {
            sample_rate,
            sample_type,
            n_channels,
            write_fact: None,
        }
    }

    /// Returns the spec with its sample rate replaced.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Returns the spec with its sample type replaced.
    pub fn with_sample_type(mut self, sample_type: SampleType) -> Self {
        self.sample_type = sample_type;
        self
    }

    /// Returns the spec with its channel count replaced.
    pub fn with_n_channels(mut self, n_channels: u16) -> Self {
        self.n_channels = n_channels;
        self
    }

    /// Returns the spec with the fact chunk forced on (``true``) or off (``false``).
    pub fn with_write_fact(mut self, write_fact: bool) -> Self {
        self.write_fact = Some(write_fact);
        self
    }

    /// Checks the spec describes a file that can be written and returns its storage type.
    ///
    /// Fails with ``InvalidSpec`` for a zero sample rate or channel count, or when the channel count and
    /// sample rate overflow the block align or byte rate fields of the header, and with
    /// ``UnsupportedEncoding`` for sample types a wav file cannot store.
    pub fn validate(&self) -> WavmapResult<WavType> {
        if self.sample_rate == 0 {
            return Err(WavmapError::InvalidSpec(
                "sample rate must be positive".into(),
            ));
        }
        if self.n_channels == 0 {
            return Err(WavmapError::InvalidSpec(
                "a wav file needs at least one channel".into(),
            ));
        }
        let wav_type = WavType::try_from(self.sample_type)?;
        FmtChunk::for_wav_type(wav_type, self.n_channels, self.sample_rate)?;
        Ok(wav_type)
    }
}

impl From<&WavHeader> for WavSpec {
    fn from(header: &WavHeader) -> Self {
        WavSpec {
            sample_rate: header.sample_rate(),
            sample_type: header.wav_type().into(),
            n_channels: header.n_channels(),
            write_fact: Some(header.fact().is_some()),
        }
    }
}

/// Reads the spec of the wav file at ``path`` without touching its samples.
pub fn wav_spec<P: AsRef<Path>>(path: P) -> WavmapResult<WavSpec> {
    let mut file = File::open(path)?;
    let header = read_header(&mut file)?;
    Ok(WavSpec::from(&header))
}

/// The kind of memory map a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    ReadOnly,
    /// Edits stay in memory and never reach the file.
    CopyOnWrite,
    /// Edits are written through to the file. Needs a handle opened for writing.
    Writable,
}

/// How a read hands out the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAccess {
    /// Copies the samples into memory.
    Eager,
    Mapped(MapMode),
}

impl Default for ReadAccess {
    fn default() -> Self {
        ReadAccess::Mapped(MapMode::CopyOnWrite)
    }
}

impl FromStr for ReadAccess {
    type Err = WavmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eager" => Ok(ReadAccess::Eager),
            "r" => Ok(ReadAccess::Mapped(MapMode::ReadOnly)),
            "c" => Ok(ReadAccess::Mapped(MapMode::CopyOnWrite)),
            "r+" => Ok(ReadAccess::Mapped(MapMode::Writable)),
            "w+" => Err(WavmapError::ModeViolation(
                "map mode \"w+\" would discard the file contents".into(),
            )),
            _ => Err(WavmapError::ModeViolation(format!(
                "invalid map mode {:?}",
                s
            ))),
        }
    }
}

/// A wav file opened for reading, writing or appending.
///
/// The header is either parsed from the stream or written to it when the handle is created. Samples are
/// appended with [`WavFile::write`] and the size fields of the header are patched by [`WavFile::flush`],
/// which also runs when the handle is closed or dropped.
pub struct WavFile<S: WavStream = File> {
    stream: Option<S>,
    path: Option<PathBuf>,
    mode: AccessMode,
    header: WavHeader,
    sizes: SizeTable,
    pending: bool,
}

impl WavFile<File> {
    /// Opens the wav file at ``path`` with one of the modes ``"r"``, ``"r+"``, ``"w"`` or ``"w+"``.
    /// ``spec`` only matters when a new header is written.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str, spec: WavSpec) -> WavmapResult<Self> {
        let mode: OpenMode = mode.parse()?;
        Self::open_with_mode(path, mode, spec)
    }

    pub fn open_with_mode<P: AsRef<Path>>(
        path: P,
        mode: OpenMode,
        spec: WavSpec,
    ) -> WavmapResult<Self> {
        let path = path.as_ref();
        if mode.truncates() {
            // nothing is created for a spec that cannot be written
            spec.validate()?;
        }
        let file = mode.open(path)?;
        let mut wav = Self::from_stream(file, mode.access_mode(), spec)?;
        wav.path = Some(path.to_path_buf());
        log!(log::Level::Debug, "Opened {}", wav);
        Ok(wav)
    }

    /// Creates, or truncates, the wav file at ``path`` for reading and writing.
    pub fn create<P: AsRef<Path>>(path: P, spec: WavSpec) -> WavmapResult<Self> {
        Self::open_with_mode(path, OpenMode::WriteUpdate, spec)
    }

    /// Opens an existing wav file read-only.
    pub fn from_path<P: AsRef<Path>>(path: P) -> WavmapResult<Self> {
        Self::open_with_mode(path, OpenMode::Read, WavSpec::default())
    }
}

impl<S: WavStream> WavFile<S> {
    /// Wraps a stream. Write-only handles and read-write handles over an empty stream write a fresh header
    /// described by ``spec``; every other handle parses the header already in the stream.
    pub fn from_stream(mut stream: S, mode: AccessMode, spec: WavSpec) -> WavmapResult<Self> {
        let stream_len = stream.seek(SeekFrom::End(0))?;
        let fresh = match mode {
            AccessMode::WriteOnly => true,
            AccessMode::ReadWrite => stream_len == 0,
            AccessMode::ReadOnly => false,
        };

        let (header, sizes, pending) = match fresh {
            true => {
                let wav_type = spec.validate()?;
                let header = WavHeader::new_header(
                    wav_type,
                    spec.n_channels,
                    spec.sample_rate,
                    spec.write_fact,
                )?;
                stream.seek(SeekFrom::Start(0))?;
                stream.write_all(&header.as_bytes())?;
                let sizes = SizeTable::new(header.data_offset(), 0);
                (header, sizes, true)
            }
            false => {
                let header = read_header(&mut stream)?;
                let data_size = match mode {
                    // resume after whatever was appended, unless another chunk sits behind the data
                    AccessMode::ReadWrite if !header.has_trailing_chunk() => {
                        stream_len.saturating_sub(header.data_offset())
                    }
                    _ => header.data_size(),
                };
                let sizes = SizeTable::new(header.data_offset(), data_size);
                let pending = mode.can_write() && data_size != header.data_size();
                (header, sizes, pending)
            }
        };

        Ok(WavFile {
            stream: Some(stream),
            path: None,
            mode,
            header,
            sizes,
            pending,
        })
    }

    fn stream_mut(&mut self) -> WavmapResult<&mut S> {
        self.stream
            .as_mut()
            .ok_or_else(|| WavmapError::ModeViolation("file is closed".into()))
    }

    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate()
    }

    pub fn n_channels(&self) -> u16 {
        self.header.n_channels()
    }

    pub fn wav_type(&self) -> WavType {
        self.header.wav_type()
    }

    pub fn sample_type(&self) -> SampleType {
        self.header.wav_type().into()
    }

    pub fn data_offset(&self) -> u64 {
        self.header.data_offset()
    }

    /// Length of the sample payload in bytes, counting everything appended through this handle.
    pub fn bytes_written(&self) -> u64 {
        self.sizes.data_size()
    }

    /// Number of complete frames in the file. A trailing partial frame is not counted.
    pub fn n_frames(&self) -> usize {
        let frame_size = self.wav_type().n_bytes() as u64 * self.n_channels() as u64;
        (self.bytes_written() / frame_size) as usize
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.n_frames() as f64 / self.sample_rate() as f64
    }

    /// Resolves a frame range to the byte offset of its first sample and its number of samples.
    fn locate(&self, frames: Option<usize>, offset: usize) -> WavmapResult<(u64, usize)> {
        if !self.mode.can_read() {
            return Err(WavmapError::ModeViolation("file is write-only".into()));
        }
        let n_frames = self.n_frames();
        if offset > n_frames {
            return Err(WavmapError::InvalidRange(format!(
                "offset {} is past the last frame ({})",
                offset, n_frames
            )));
        }
        let frames = frames.unwrap_or(n_frames - offset);
        if frames > n_frames - offset {
            return Err(WavmapError::InvalidRange(format!(
                "{} frames from offset {} exceed the {} frames in the file",
                frames, offset, n_frames
            )));
        }
        let n_channels = self.n_channels() as usize;
        let start = self.data_offset()
            + (offset * n_channels * self.wav_type().n_bytes()) as u64;
        Ok((start, frames * n_channels))
    }

    /// Reads ``frames`` frames, or every frame after ``offset`` when ``None``, starting at frame ``offset``.
    ///
    /// ``T`` must be the sample type stored in the file, use [`WavFile::read_rescaled`] otherwise. Mapped
    /// reads of streams that are not files, or of data not aligned for ``T``, fall back to an in-memory copy,
    /// except for [`MapMode::Writable`] which fails instead.
    pub fn read<T: AudioSample>(
        &mut self,
        frames: Option<usize>,
        offset: usize,
        access: ReadAccess,
    ) -> WavmapResult<Samples<T>> {
        let (start, n_samples) = self.locate(frames, offset)?;
        if T::SAMPLE_TYPE != self.sample_type() {
            return Err(WavmapError::InvalidType(format!(
                "file stores {} samples, cannot read them as {}",
                self.sample_type(),
                T::SAMPLE_TYPE
            )));
        }
        let map_mode = match access {
            ReadAccess::Eager => None,
            ReadAccess::Mapped(MapMode::Writable) if !self.mode.can_write() => {
                return Err(WavmapError::ModeViolation(
                    "cannot map a read-only file as writable".into(),
                ))
            }
            ReadAccess::Mapped(map_mode) => Some(map_mode),
        };
        let n_channels = self.n_channels() as usize;

        let stream = self.stream_mut()?;
        stream.flush()?;
        let storage = match map_mode {
            Some(map_mode) if n_samples > 0 => match stream.as_file() {
                Some(file) => map_storage::<T>(file, start, n_samples, map_mode)?,
                None if map_mode == MapMode::Writable => {
                    return Err(WavmapError::ModeViolation(
                        "only files can be mapped as writable".into(),
                    ))
                }
                None => None,
            },
            _ => None,
        };

        let samples = match storage {
            Some(storage) => Samples::from_storage(storage, n_channels),
            None => Samples::new(read_exact_at::<T, S>(stream, start, n_samples)?, n_channels),
        };
        log!(
            log::Level::Trace,
            "Read {} frames from offset {}",
            samples.n_frames(),
            offset
        );
        Ok(samples)
    }

    /// Reads like [`WavFile::read`] into memory and rescales the samples into the domain of ``T``.
    pub fn read_rescaled<T: AudioSample>(
        &mut self,
        frames: Option<usize>,
        offset: usize,
    ) -> WavmapResult<Samples<T>> {
        let (start, n_samples) = self.locate(frames, offset)?;
        let n_channels = self.n_channels() as usize;
        let wav_type = self.wav_type();
        let stream = self.stream_mut()?;
        stream.flush()?;

        macro_rules! read_as {
            ($S:ty) => {
                rescale_slice::<$S, T>(&read_exact_at::<$S, S>(stream, start, n_samples)?)
            };
        }
        let samples: Box<[T]> = match wav_type {
            WavType::Pcm8 => read_as!(u8),
            WavType::Pcm16 => read_as!(i16),
            WavType::Pcm32 => read_as!(i32),
            WavType::Pcm64 => read_as!(i64),
            WavType::Float32 => read_as!(f32),
            WavType::Float64 => read_as!(f64),
        };
        Ok(Samples::new(samples, n_channels))
    }

    /// Appends ``data`` to the data chunk, converted to the sample type of the file. With ``rescale`` the values are
    /// mapped onto the domain of the file's type, otherwise they are cast as is and may wrap or saturate.
    ///
    /// ``data`` holds interleaved frames, so its length must be a multiple of the channel count.
    pub fn write<D: AudioSample>(&mut self, data: &[D], rescale: bool) -> WavmapResult<&mut Self> {
        if !self.mode.can_write() {
            return Err(WavmapError::ModeViolation("file is read-only".into()));
        }
        if self.header.has_trailing_chunk() {
            return Err(WavmapError::AppendConflict);
        }
        let n_channels = self.n_channels() as usize;
        if data.len() % n_channels != 0 {
            return Err(WavmapError::InvalidRange(format!(
                "{} samples do not make up whole frames of {} channels",
                data.len(),
                n_channels
            )));
        }

        let target = self.sample_type();
        let buffer = match rescale {
            true => rescale_into(data, target),
            false => cast_into(data, target),
        };
        let bytes = buffer.as_bytes();

        let mut sizes = self.sizes;
        sizes.record(bytes.len() as u64)?;
        let at = self.data_offset() + self.bytes_written();

        let stream = self.stream_mut()?;
        stream.seek(SeekFrom::Start(at))?;
        stream.write_all(bytes)?;

        self.sizes = sizes;
        self.pending = true;
        log!(
            log::Level::Trace,
            "Appended {} bytes at offset {}",
            bytes.len(),
            at
        );
        Ok(self)
    }

    /// Patches the RIFF and data size fields of the header. Does nothing for read-only handles or when nothing
    /// was written since the last flush.
    pub fn flush(&mut self) -> WavmapResult<&mut Self> {
        if !self.mode.can_write() || !self.pending {
            return Ok(self);
        }
        let entries = self.sizes.entries();
        let stream = self.stream_mut()?;
        for entry in entries {
            stream.seek(SeekFrom::Start(entry.offset))?;
            stream.write_all(&entry.value.to_le_bytes())?;
        }
        stream.flush()?;
        self.pending = false;
        log!(
            log::Level::Debug,
            "Flushed header, {} data bytes",
            self.bytes_written()
        );
        Ok(self)
    }

    /// Flushes and closes the file.
    pub fn close(mut self) -> WavmapResult<()> {
        self.flush()?;
        self.stream.take();
        Ok(())
    }

    /// Flushes and returns the underlying stream.
    pub fn into_inner(mut self) -> WavmapResult<S> {
        self.flush()?;
        self.stream
            .take()
            .ok_or_else(|| WavmapError::ModeViolation("file is closed".into()))
    }
}

impl<S: WavStream> Drop for WavFile<S> {
    fn drop(&mut self) {
        if self.stream.is_none() {
            return;
        }
        if let Err(_e) = self.flush() {
            log!(log::Level::Warn, "Failed to flush {} on drop: {}", self, _e);
        }
    }
}

impl<S: WavStream> Display for WavFile<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path = match &self.path {
            Some(path) => path.display().to_string(),
            None => "<stream>".to_string(),
        };
        write!(
            f,
            "WavFile(path: {}, mode: {:?}, type: {}, sample rate: {})",
            path,
            self.mode,
            self.wav_type(),
            self.sample_rate()
        )
    }
}

impl<S: WavStream> Debug for WavFile<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WavFile")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("header", &self.header)
            .field("sizes", &self.sizes)
            .field("pending", &self.pending)
            .finish()
    }
}

fn read_exact_at<T: AudioSample, R: Read + Seek>(
    reader: &mut R,
    start: u64,
    n_samples: usize,
) -> WavmapResult<Box<[T]>> {
    let mut samples: Box<[T]> = vec![<T as Zeroable>::zeroed(); n_samples].into_boxed_slice();
    reader.seek(SeekFrom::Start(start))?;
    reader.read_exact(cast_slice_mut::<T, u8>(&mut samples))?;
    Ok(samples)
}

/// Maps ``n_samples`` samples of ``file`` from ``start``. Returns ``None`` when the mapped bytes are not aligned
/// for ``T`` and a copy can stand in for the map.
fn map_storage<T: AudioSample>(
    file: &File,
    start: u64,
    n_samples: usize,
    map_mode: MapMode,
) -> WavmapResult<Option<Storage<T>>> {
    let mut options = MmapOptions::new();
    options
        .offset(start)
        .len(n_samples * std::mem::size_of::<T>());
    let storage = match map_mode {
        MapMode::ReadOnly => Storage::ReadOnly(unsafe { options.map(file)? }),
        MapMode::CopyOnWrite => Storage::CopyOnWrite(unsafe { options.map_copy(file)? }),
        MapMode::Writable => Storage::Writable(unsafe { options.map_mut(file)? }),
    };
    if bytemuck::try_cast_slice::<u8, T>(storage.bytes()).is_ok() {
        return Ok(Some(storage));
    }
    match map_mode {
        MapMode::Writable => Err(WavmapError::InvalidType(format!(
            "data at offset {} is not aligned for {}",
            start,
            T::SAMPLE_TYPE
        ))),
        _ => {
            log!(
                log::Level::Debug,
                "Data at offset {} is not aligned for {}, copying instead",
                start,
                T::SAMPLE_TYPE
            );
            Ok(None)
        }
    }
}

#[derive(Debug)]
enum Storage<T: AudioSample> {
    Owned(Box<[T]>),
    ReadOnly(Mmap),
    CopyOnWrite(MmapMut),
    Writable(MmapMut),
}

impl<T: AudioSample> Storage<T> {
    fn bytes(&self) -> &[u8] {
        match self {
            Storage::Owned(samples) => cast_slice(&samples[..]),
            Storage::ReadOnly(map) => &map[..],
            Storage::CopyOnWrite(map) | Storage::Writable(map) => &map[..],
        }
    }

    fn as_slice(&self) -> &[T] {
        match self {
            Storage::Owned(samples) => &samples[..],
            // maps are only stored once their alignment has been checked
            _ => cast_slice(self.bytes()),
        }
    }
}

/// Samples read from a wav file, either copied into memory or memory mapped. Interleaved frames of
/// ``n_channels`` samples.
#[derive(Debug)]
pub struct Samples<T>
where
    T: AudioSample,
{
    storage: Storage<T>,
    n_channels: usize,
}

impl<T> Samples<T>
where
    T: AudioSample,
{
    /// Construct a new Samples struct from a boxed slice of interleaved audio samples.
    pub fn new(samples: Box<[T]>, n_channels: usize) -> Self {
        Samples {
            storage: Storage::Owned(samples),
            n_channels: n_channels.max(1),
        }
    }

    fn from_storage(storage: Storage<T>, n_channels: usize) -> Self {
        Samples {
            storage,
            n_channels: n_channels.max(1),
        }
    }

    /// Returns the number of channels per frame.
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Returns the number of whole frames.
    pub fn n_frames(&self) -> usize {
        self.len() / self.n_channels
    }

    /// The samples of every channel at frame ``index``.
    pub fn frame(&self, index: usize) -> Option<&[T]> {
        let start = index.checked_mul(self.n_channels)?;
        self.get(start..start + self.n_channels)
    }

    /// Iterates over the frames, each a slice of one sample per channel.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use wavmap::Samples;
    ///
    /// let samples = Samples::new(vec![1i16, -1, 2, -2].into_boxed_slice(), 2);
    /// for frame in samples.frames() {
    ///     assert_eq!(frame[0], -frame[1]);
    /// }
    /// ```
    pub fn frames(&self) -> ChunksExact<'_, T> {
        self.chunks_exact(self.n_channels)
    }

    /// Whether the samples are a memory map of the file rather than an in-memory copy.
    pub fn is_mapped(&self) -> bool {
        !matches!(self.storage, Storage::Owned(_))
    }

    /// Whether edits to the samples are written through to the file.
    pub fn is_shared(&self) -> bool {
        matches!(self.storage, Storage::Writable(_))
    }

    /// Mutable access to the samples. Fails for read-only maps.
    pub fn as_mut_slice(&mut self) -> WavmapResult<&mut [T]> {
        match &mut self.storage {
            Storage::Owned(samples) => Ok(&mut samples[..]),
            Storage::CopyOnWrite(map) | Storage::Writable(map) => Ok(cast_slice_mut(&mut map[..])),
            Storage::ReadOnly(_) => Err(WavmapError::ModeViolation(
                "samples are mapped read-only".into(),
            )),
        }
    }

    /// Writes edits of a writable map back to the file. Does nothing for other samples.
    pub fn flush(&self) -> WavmapResult<()> {
        if let Storage::Writable(map) = &self.storage {
            map.flush()?;
        }
        Ok(())
    }

    /// Rescales the samples into the domain of ``F``.
    pub fn rescale<F: AudioSample>(&self) -> Samples<F> {
        Samples::new(rescale_slice::<T, F>(self), self.n_channels)
    }

    /// Converts the samples to the corresponding bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.bytes()
    }

    /// Consumes the samples and returns them as an owned slice, copying them out of a map if need be.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        match self.storage {
            Storage::Owned(samples) => samples,
            ref mapped => Box::from(mapped.as_slice()),
        }
    }
}

impl<T> Deref for Samples<T>
where
    T: AudioSample,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.storage.as_slice()
    }
}

impl<T> AsRef<[T]> for Samples<T>
where
    T: AudioSample,
{
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T> Clone for Samples<T>
where
    T: AudioSample,
{
    fn clone(&self) -> Self {
        Samples::new(Box::from(self.as_ref()), self.n_channels)
    }
}

impl<T> PartialEq for Samples<T>
where
    T: AudioSample,
{
    fn eq(&self, other: &Self) -> bool {
        self.n_channels == other.n_channels && self.as_ref() == other.as_ref()
    }
}

// From Vec
impl<T> From<Vec<T>> for Samples<T>
where
    T: AudioSample,
{
    fn from(samples: Vec<T>) -> Self {
        Samples::new(samples.into_boxed_slice(), 1)
    }
}

// From Slice
impl<T> From<&[T]> for Samples<T>
where
    T: AudioSample,
{
    fn from(samples: &[T]) -> Self {
        Samples::new(Box::from(samples), 1)
    }
}

// From boxed slice
impl<T> From<Box<[T]>> for Samples<T>
where
    T: AudioSample,
{
    fn from(samples: Box<[T]>) -> Self {
        Samples::new(samples, 1)
    }
}

impl<T> Display for Samples<T>
where
    T: AudioSample,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_ref())
    }
}

#[cfg(feature = "ndarray")]
use crate::conversion::ndarray_conversion::{AsNdarray, IntoNdarray};
#[cfg(feature = "ndarray")]
use ndarray::{Array2, ArrayView2, ShapeError};

#[cfg(feature = "ndarray")]
impl<T> IntoNdarray for Samples<T>
where
    T: AudioSample,
{
    type Target = T;

    fn into_ndarray(self) -> Result<Array2<Self::Target>, ShapeError> {
        let shape = (self.n_frames(), self.n_channels);
        Array2::from_shape_vec(shape, self.into_boxed_slice().into_vec())
    }
}

#[cfg(feature = "ndarray")]
impl<T> AsNdarray for Samples<T>
where
    T: AudioSample,
{
    type Target = T;

    fn as_ndarray(&self) -> Result<ArrayView2<'_, Self::Target>, ShapeError> {
        ArrayView2::from_shape((self.n_frames(), self.n_channels), self.as_ref())
    }
}
