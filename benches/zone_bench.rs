use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use world_protocol::config::{ByteOrder, StreamConfig};
use world_protocol::core::stream::{LengthType, WriteStream};
use world_protocol::{Vector3, Vector4, ZoneDocument};

#[allow(clippy::unwrap_used)]
fn zone_bytes(scenes: usize) -> Vec<u8> {
    let mut out = WriteStream::new(ByteOrder::Little);
    out.write_u32(0x26);
    out.write_u32(0);
    out.write_u32(1200);
    out.write(&Vector3::new(-5.0, 290.0, 12.5)).unwrap();
    out.write(&Vector4::new(0.0, 0.0, 0.0, 1.0)).unwrap();
    out.write_u32(scenes as u32);
    for id in 0..scenes {
        let filename = format!("nt_scene_{id}.lvl");
        out.write_prefixed(filename.as_bytes(), LengthType::U8).unwrap();
        out.write_u8(id as u8);
        out.write_bytes(&[0; 7]);
        out.write_prefixed(b"Scene", LengthType::U8).unwrap();
        out.write_bytes(&[0; 3]);
    }
    out.as_slice().to_vec()
}

#[allow(clippy::unwrap_used)]
fn bench_zone_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("zone_parse");

    for &scenes in &[1usize, 32, 255] {
        let data = bytes::Bytes::from(zone_bytes(scenes));
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(format!("{scenes}_scenes"), |b| {
            b.iter(|| ZoneDocument::parse(data.clone(), StreamConfig::default()).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_zone_parse);
criterion_main!(benches);
