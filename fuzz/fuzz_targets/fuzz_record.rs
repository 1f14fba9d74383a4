#![no_main]

use libfuzzer_sys::fuzz_target;
use world_protocol::config::{ByteOrder, StreamConfig};
use world_protocol::core::stream::ReadStream;
use world_protocol::{decode_record, RecordKind};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let kind = RecordKind::ALL[selector as usize % RecordKind::ALL.len()];
    let order = if selector & 0x80 == 0 {
        ByteOrder::Little
    } else {
        ByteOrder::Big
    };
    let mut stream = ReadStream::with_config(rest.to_vec(), StreamConfig::with_byte_order(order));
    let _ = decode_record(kind, &mut stream);
});
