use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use world_protocol::config::StreamConfig;
use world_protocol::utils::metrics;
use world_protocol::{
    CharacterSummary, Encodable, ObjectId, ObjectIdFlags, PropertyList, PropertyValue,
};

#[test]
fn concurrent_encode_heavy() {
    let iterations = 5_000usize;
    let item_counts = [0usize, 1, 8, 64, 512];
    let before = metrics::global().snapshot().records_encoded;

    let handles: Vec<_> = item_counts
        .iter()
        .map(|&count| {
            thread::spawn(move || {
                for i in 0..iterations {
                    let summary = CharacterSummary {
                        current_name: format!("worker{count}-{i}"),
                        equipped_items: vec![i as u32; count],
                        ..CharacterSummary::default()
                    };
                    let bytes = summary.to_bytes(StreamConfig::default()).unwrap();
                    assert_eq!(bytes.len(), 152 + 4 * count);

                    let mut props = PropertyList::new();
                    props.push("i", PropertyValue::U32(i as u32));
                    assert_eq!(props.to_bytes(StreamConfig::default()).unwrap().len(), 12);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let encoded = metrics::global().snapshot().records_encoded - before;
    assert!(encoded >= (2 * iterations * item_counts.len()) as u64);
}

#[test]
fn concurrent_id_generation_keeps_flags() {
    let flags = ObjectIdFlags::PERSISTENT | ObjectIdFlags::CHARACTER;
    let seen = Arc::new(std::sync::Mutex::new(HashSet::new()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                let ids: Vec<ObjectId> = (0..1000).map(|_| ObjectId::generate(flags)).collect();
                for id in &ids {
                    assert_eq!(id.flags(), flags);
                }
                seen.lock().unwrap().extend(ids);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    // 8000 draws from 2^32 values; a handful of clashes is tolerated
    assert!(seen.lock().unwrap().len() > 7900);
}
