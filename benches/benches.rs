use criterion::{
    black_box, criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion,
    PlotConfiguration, Throughput,
};
use wavmap::{conversion::rescale_slice, ReadAccess, SampleType, WavFile, WavSpec};

const SAMPLE_RATE: u32 = 44100;
const DURATIONS: [u32; 3] = [1, 10, 60];

fn sine(n_samples: usize) -> Vec<f32> {
    (0..n_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            (t * 440.0 * 2.0 * std::f32::consts::PI).sin() * 0.8
        })
        .collect()
}

pub fn bench_rescale(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rescale");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for seconds in DURATIONS {
        let samples = sine((SAMPLE_RATE * seconds) as usize);
        let as_i16: Box<[i16]> = rescale_slice::<f32, i16>(&samples);
        group.throughput(Throughput::Elements(samples.len() as u64));

        group.bench_function(BenchmarkId::new("f32_to_i16", seconds), |b| {
            b.iter(|| rescale_slice::<f32, i16>(black_box(&samples)))
        });
        group.bench_function(BenchmarkId::new("i16_to_f32", seconds), |b| {
            b.iter(|| rescale_slice::<i16, f32>(black_box(&as_i16)))
        });
        group.bench_function(BenchmarkId::new("i16_to_i32", seconds), |b| {
            b.iter(|| rescale_slice::<i16, i32>(black_box(&as_i16)))
        });
    }
    group.finish();
}

pub fn bench_read_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("Read/Write Operations");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let dir = tempfile::tempdir().unwrap();

    for seconds in DURATIONS {
        let samples = sine((SAMPLE_RATE * seconds) as usize);
        let path = dir.path().join(format!("bench_{}s.wav", seconds));
        let spec = WavSpec::new(SAMPLE_RATE, SampleType::I16, 1);

        group.bench_function(BenchmarkId::new("write_rescaled", seconds), |b| {
            b.iter(|| {
                let mut wav = WavFile::open(&path, "w", spec).unwrap();
                wav.write(black_box(&samples), true).unwrap();
                wav.close().unwrap();
            })
        });

        let file_size = std::fs::metadata(&path).unwrap().len();
        group.throughput(Throughput::Bytes(file_size));

        group.bench_function(BenchmarkId::new("read_eager", seconds), |b| {
            b.iter(|| {
                let mut wav = WavFile::from_path(&path).unwrap();
                black_box(wav.read::<i16>(None, 0, ReadAccess::Eager).unwrap());
            })
        });
        group.bench_function(BenchmarkId::new("read_mapped", seconds), |b| {
            b.iter(|| {
                let mut wav = WavFile::from_path(&path).unwrap();
                black_box(wav.read::<i16>(None, 0, ReadAccess::default()).unwrap());
            })
        });
        group.bench_function(BenchmarkId::new("read_rescaled_f32", seconds), |b| {
            b.iter(|| {
                let mut wav = WavFile::from_path(&path).unwrap();
                black_box(wav.read_rescaled::<f32>(None, 0).unwrap());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rescale, bench_read_write);
criterion_main!(benches);
