use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scanme_qr::{StudentRef, codec};

fn bench_encode(c: &mut Criterion) {
    let student = StudentRef::new("12345", "2023-00017");
    c.bench_function("codec_encode", |b| {
        b.iter(|| codec::encode(black_box(&student)))
    });
}

fn bench_decode(c: &mut Criterion) {
    let text = codec::encode(&StudentRef::new("12345", "2023-00017"));
    c.bench_function("codec_decode", |b| b.iter(|| codec::decode(black_box(&text))));
}

fn bench_decode_foreign_text(c: &mut Criterion) {
    // The common rejection path: a QR code that is not ours.
    let text = "https://example.com/some/unrelated/link";
    c.bench_function("codec_decode_foreign", |b| {
        b.iter(|| codec::decode(black_box(text)))
    });
}

fn bench_validate(c: &mut Criterion) {
    let text = codec::encode(&StudentRef::new("12345", "2023-00017"));
    c.bench_function("codec_validate", |b| {
        b.iter(|| codec::validate(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_decode_foreign_text,
    bench_validate
);
criterion_main!(benches);
