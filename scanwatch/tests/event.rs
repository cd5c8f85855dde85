use std::net::Ipv4Addr;

use scanwatch::{DetectionEvent, RecordError, Signature};
use scanwatch_common::DetectionRecord;

fn entry(src: [u8; 4], id: u16, code: u8) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(DetectionRecord::SIZE);
    bytes.extend_from_slice(&src);
    bytes.extend_from_slice(&id.to_ne_bytes());
    bytes.push(code);
    bytes.push(0);
    bytes
}

#[test]
fn ring_entry_decodes_to_event() -> Result<(), RecordError> {
    let event = DetectionEvent::from_entry(&entry([172, 16, 0, 5], 777, Signature::Ack.code()))?;
    assert_eq!(event, DetectionEvent::new(Ipv4Addr::new(172, 16, 0, 5), 777, Signature::Ack));
    assert_eq!(event.to_string(), "ACK Packet from 172.16.0.5 having ID 777");
    Ok(())
}

#[test]
fn short_entry_is_rejected() {
    assert_eq!(DetectionEvent::from_entry(&[1, 2, 3]), Err(RecordError::Short(3)));
}

#[test]
fn unknown_code_is_rejected() {
    assert_eq!(
        DetectionEvent::from_entry(&entry([10, 0, 0, 1], 1, 9)),
        Err(RecordError::UnknownSignature(9))
    );
}
