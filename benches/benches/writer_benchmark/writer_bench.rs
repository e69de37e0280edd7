use std::{hint::black_box, io};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulse_core::{encode_samples, PulseStreamHeaderExt, PulseStreamReader};
use pulse_recorder::{PulseStreamWriter, StreamParams, WriterOptions};

fn pulse(samples: usize) -> (Vec<f32>, Vec<f32>) {
    let time = (0..samples).map(|i| i as f32 * 0.4).collect();
    let voltage = (0..samples).map(|i| (i as f32 * 0.01).sin()).collect();
    (time, voltage)
}

fn bench_write_pulse(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_pulse");

    for samples in [256usize, 1024, 4096] {
        let params = StreamParams::new(200.0, 2.5, samples as i32);
        let (time, voltage) = pulse(samples);

        group.throughput(Throughput::Bytes(params.record_len_bytes() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(samples), &samples, |b, _| {
            let mut writer: PulseStreamWriter<io::Sink> =
                PulseStreamWriter::with_options(WriterOptions::default());
            writer.start_with_sink("sink", io::sink(), &params).unwrap();

            b.iter(|| {
                writer
                    .write_pulse(black_box(&time), black_box(&voltage))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_read_pulses(c: &mut Criterion) {
    let samples = 1024;
    let records = 256;
    let params = StreamParams::new(200.0, 2.5, samples as i32);
    let (time, voltage) = pulse(samples);

    let mut raw = params.header().encode().unwrap().to_vec();
    for _ in 0..records {
        raw.extend_from_slice(&encode_samples(&time));
        raw.extend_from_slice(&encode_samples(&voltage));
    }

    let mut group = c.benchmark_group("read_pulses");
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("1024x256", |b| {
        b.iter(|| {
            let reader = PulseStreamReader::new(black_box(raw.as_slice())).unwrap();
            assert_eq!(reader.count(), records);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_write_pulse, bench_read_pulses);
criterion_main!(benches);
