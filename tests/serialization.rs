//! Integration tests for exact wire layouts and the JSON view of decoded records

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use world_protocol::config::{ByteOrder, StreamConfig, CHARACTER_NAME_LENGTH, XML_HEADER};
use world_protocol::core::stream::ReadStream;
use world_protocol::protocol::character::PLACEHOLDER_OBJECT_ID;
use world_protocol::protocol::dispatcher::{decode_record, RecordKind};
use world_protocol::{
    CharacterSummary, Encodable, ObjectId, ObjectIdFlags, PropertyList, PropertyValue,
    Vector3, Vector4, XmlElement,
};

/// Reads the character record back field by field
fn read_summary(bytes: &[u8], order: ByteOrder) -> (u64, String, String, Vec<u32>, Vec<u32>) {
    let mut s = ReadStream::new(bytes.to_vec(), order);
    let id = s.read_u64().unwrap();
    assert_eq!(s.read_u32().unwrap(), 0);
    let name = String::from_utf8(s.read_fixed(CHARACTER_NAME_LENGTH).unwrap().to_vec()).unwrap();
    let pending = String::from_utf8(s.read_fixed(CHARACTER_NAME_LENGTH).unwrap().to_vec()).unwrap();
    s.skip(2).unwrap();
    let head_color = s.read_u32().unwrap();
    assert_eq!(s.read_u16().unwrap(), 0);
    let mut style = vec![head_color];
    for _ in 0..11 {
        style.push(s.read_u32().unwrap());
    }
    assert_eq!(s.read_u32().unwrap(), 0);
    s.skip(2 + 2 + 4).unwrap();
    assert_eq!(s.read_u64().unwrap(), 0);
    let count = s.read_u16().unwrap();
    let items = (0..count).map(|_| s.read_u32().unwrap()).collect();
    assert!(s.is_empty());
    (id, name, pending, style, items)
}

#[test]
fn test_character_summary_field_order() {
    let summary = CharacterSummary {
        object_id: ObjectId(0x1000_0001_2345_6789),
        current_name: "Brickbeard".into(),
        unapproved_name: "CaptainBrick".into(),
        head_color: 1,
        head: 2,
        chest_color: 3,
        chest: 4,
        legs: 5,
        hair_style: 6,
        hair_color: 7,
        left_hand: 8,
        right_hand: 9,
        eyebrow_style: 10,
        eye_style: 11,
        mouth_style: 12,
        last_zone: 1100,
        equipped_items: vec![4106, 2524, 7486],
        ..CharacterSummary::default()
    };

    for order in [ByteOrder::Little, ByteOrder::Big] {
        let bytes = summary.to_bytes(StreamConfig::with_byte_order(order)).unwrap();
        let (id, name, pending, style, items) = read_summary(&bytes, order);
        assert_eq!(id, 0x1000_0001_2345_6789);
        assert_eq!(name, "Brickbeard");
        assert_eq!(pending, "CaptainBrick");
        assert_eq!(style, (1..=12).collect::<Vec<u32>>());
        assert_eq!(items, vec![4106, 2524, 7486]);
    }
}

#[test]
fn test_name_exactly_allocation_has_no_terminator() {
    let name = "a".repeat(CHARACTER_NAME_LENGTH);
    let summary = CharacterSummary {
        current_name: name.clone(),
        ..CharacterSummary::default()
    };
    let bytes = summary.to_bytes(StreamConfig::default()).unwrap();
    assert_eq!(&bytes[12..12 + CHARACTER_NAME_LENGTH], name.as_bytes());
    assert_eq!(bytes[12 + CHARACTER_NAME_LENGTH], 0);
}

#[test]
fn test_default_summary() {
    let summary = CharacterSummary::default();
    assert_eq!(summary.object_id.as_u64(), PLACEHOLDER_OBJECT_ID);
    let bytes = summary.to_bytes(StreamConfig::default()).unwrap();
    assert_eq!(&bytes[..8], &1124u64.to_le_bytes());
    assert!(bytes[8..].iter().all(|&b| b == 0));
}

#[test]
fn test_property_list_mixed_values() {
    let id = ObjectId::generate(ObjectIdFlags::PERSISTENT);
    let mut props = PropertyList::new();
    props.push("name", "Brick");
    props.push("scale", 1.5f32);
    props.push("owner", id);
    props.push("big", i64::MIN);
    props.push(
        "xml",
        XmlElement::new("obj")
            .with_attribute("v", "1")
            .with_child(XmlElement::new("mf").with_attribute("hc", "4")),
    );

    let bytes = props.to_bytes(StreamConfig::default()).unwrap();
    let mut s = ReadStream::new(bytes, ByteOrder::Little);
    assert_eq!(s.read_u32().unwrap(), 5);

    assert_eq!(s.read_u8().unwrap(), 8);
    s.skip(8).unwrap();
    assert_eq!(s.read_u8().unwrap(), 0);
    assert_eq!(s.read_u32().unwrap(), 5);
    assert_eq!(&s.read_bytes(5).unwrap()[..], b"Brick");

    assert_eq!(s.read_u8().unwrap(), 10);
    s.skip(10).unwrap();
    assert_eq!(s.read_u8().unwrap(), 3);
    assert_eq!(s.read_f32().unwrap(), 1.5);

    assert_eq!(s.read_u8().unwrap(), 10);
    s.skip(10).unwrap();
    assert_eq!(s.read_u8().unwrap(), 9);
    assert_eq!(s.read_u64().unwrap(), id.as_u64());

    assert_eq!(s.read_u8().unwrap(), 6);
    s.skip(6).unwrap();
    assert_eq!(s.read_u8().unwrap(), 8);
    assert_eq!(s.read_i64().unwrap(), i64::MIN);

    assert_eq!(s.read_u8().unwrap(), 6);
    s.skip(6).unwrap();
    assert_eq!(s.read_u8().unwrap(), 13);
    let markup = s.read_prefixed(world_protocol::LengthType::U32).unwrap();
    let expected = format!("{XML_HEADER}<obj v=\"1\"><mf hc=\"4\" /></obj>");
    assert_eq!(&markup[..], expected.as_bytes());
    assert!(s.is_empty());
}

#[test]
fn test_property_value_conversions() {
    assert_eq!(PropertyValue::from(7u32), PropertyValue::U32(7));
    assert_eq!(PropertyValue::from(-7i32), PropertyValue::I32(-7));
    assert_eq!(PropertyValue::from(true), PropertyValue::Bool(true));
    assert_eq!(
        PropertyValue::from(ObjectId(5)).tag(),
        world_protocol::protocol::ldf::TAG_OBJECT_ID
    );
}

#[test]
fn test_decoded_record_json() {
    let mut data = Vec::new();
    for v in [0.0f32, 0.5, 0.0, 1.0] {
        data.extend_from_slice(&v.to_be_bytes());
    }
    let mut input = ReadStream::new(data, ByteOrder::Big);
    let record = decode_record(RecordKind::Vector4, &mut input).unwrap();

    let json: serde_json::Value = serde_json::to_value(&record).unwrap();
    assert_eq!(json["kind"], "Vector4");
    assert_eq!(json["value"]["y"], 0.5);
    assert_eq!(json["value"]["w"], 1.0);
}

#[test]
fn test_vector_text_form() {
    assert_eq!(Vector3::new(1.0, -2.5, 0.0).to_string(), "1,-2.5,0");
    assert_eq!(Vector4::new(0.0, 0.0, 0.0, 1.0).to_string(), "0,0,0,1");
}
