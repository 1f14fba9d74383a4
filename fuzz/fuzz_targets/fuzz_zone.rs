#![no_main]

use libfuzzer_sys::fuzz_target;
use world_protocol::config::StreamConfig;
use world_protocol::ZoneDocument;

fuzz_target!(|data: &[u8]| {
    // Zone decoding must fail cleanly on any input, never panic or over-allocate
    let _ = ZoneDocument::parse(data.to_vec(), StreamConfig::default());
});
