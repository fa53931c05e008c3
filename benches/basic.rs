use criterion::{criterion_group, criterion_main, Criterion};
use serial_line_monitor::monitor::{decode_trimmed, InvalidBytes};
use std::hint::black_box;
use std::time::Duration;

pub fn bench_decode(c: &mut Criterion) {
    let clean = b"RPM=3120 TPS=14.2 MAP=98kPa IAT=31C\r\n".to_vec();
    let mut noisy = clean.clone();
    noisy.splice(4..4, [0xff, 0xfe, 0x80]);

    c.bench_function("decode_clean_line", |b| {
        b.iter(|| black_box(decode_trimmed(black_box(&clean), InvalidBytes::Ignore)))
    });
    c.bench_function("decode_noisy_line", |b| {
        b.iter(|| black_box(decode_trimmed(black_box(&noisy), InvalidBytes::Ignore)))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_millis(300))
        .measurement_time(Duration::from_secs(2));
    targets = bench_decode
}
criterion_main!(benches);
