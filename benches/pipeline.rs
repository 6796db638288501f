use cardiograph::holter::encode_i16_le;
use cardiograph::{analyze_holter, analyze_scan, LayoutMode};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_holter_10s(c: &mut Criterion) {
    let mut samples = vec![0i16; 5000];
    for i in (250..5000).step_by(500) {
        samples[i] = 1000;
    }
    let bytes = encode_i16_le(&samples);
    c.bench_function("analyze_holter_5000_samples", |b| {
        b.iter(|| analyze_holter(black_box(&bytes), black_box(500)))
    });
}

fn bench_scan_single_strip(c: &mut Criterion) {
    let width = 600;
    let height = 400;
    let mut rgb = vec![255u8; width * height * 3];
    // Trace along the strip band with a spike every 40 columns
    for x in 0..width {
        let rise: usize = if x % 40 == 0 { 30 } else { 0 };
        let idx = ((350 - rise) * width + x) * 3;
        rgb[idx] = 10;
        rgb[idx + 1] = 10;
        rgb[idx + 2] = 10;
    }
    c.bench_function("analyze_scan_600x400_strip", |b| {
        b.iter(|| {
            analyze_scan(
                black_box(&rgb),
                black_box(width),
                black_box(height),
                LayoutMode::SingleStrip,
            )
        })
    });
}

fn bench_scan_twelve_lead(c: &mut Criterion) {
    let width = 1200;
    let height = 900;
    let rgb = vec![255u8; width * height * 3];
    c.bench_function("analyze_scan_1200x900_twelve_lead", |b| {
        b.iter(|| {
            analyze_scan(
                black_box(&rgb),
                black_box(width),
                black_box(height),
                LayoutMode::TwelveLead,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_holter_10s,
    bench_scan_single_strip,
    bench_scan_twelve_lead
);
criterion_main!(benches);
