//! Micro benchmarks for the scan classifier and the userspace entry point.
//! Pure CPU - no network, no IO, no BPF.
//!
//! ```bash
//! cargo bench --bench bench_classify
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use scanwatch::{classify, on_packet, DetectionEvent, DetectionSink, FlagVector};
use std::hint::black_box;

/// Sink that drops everything, so the bench measures decoding only.
struct NullSink;

impl DetectionSink for NullSink {
    fn emit(&self, event: &DetectionEvent) {
        black_box(event);
    }
}

/// 20-byte IPv4 header + 20-byte TCP header, SYN from 192.0.2.1.
#[rustfmt::skip]
const SYN_PACKET: [u8; 40] = [
    0x45, 0x00, 0x00, 0x28, 0xbe, 0xef, 0x40, 0x00, 0x40, 0x06, 0x00, 0x00,
    192, 0, 2, 1,
    198, 51, 100, 1,
    0x9c, 0x40, 0x00, 0x16, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x50, 0x02, 0xfa, 0xf0, 0x00, 0x00, 0x00, 0x00,
];

fn bench_classify_all_flag_bytes(c: &mut Criterion) {
    c.bench_function("classify_256_flag_bytes", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for bits in 0u8..=255 {
                if classify(FlagVector::from_bits(black_box(bits))).is_some() {
                    hits += 1;
                }
            }
            hits
        })
    });
}

fn bench_on_packet(c: &mut Criterion) {
    let mut syn_ack = SYN_PACKET;
    syn_ack[33] = 0x12;

    c.bench_function("on_packet_syn", |b| {
        b.iter(|| on_packet(black_box(&SYN_PACKET[..]), &NullSink))
    });
    c.bench_function("on_packet_syn_ack", |b| {
        b.iter(|| on_packet(black_box(&syn_ack[..]), &NullSink))
    });
}

criterion_group!(benches, bench_classify_all_flag_bytes, bench_on_packet);
criterion_main!(benches);
