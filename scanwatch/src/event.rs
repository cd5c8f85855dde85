use std::fmt;
use std::net::Ipv4Addr;

use scanwatch_common::{DetectionRecord, Signature};
use thiserror::Error;

/// A packet that matched a scan signature.
///
/// Built per match and handed straight to a
/// [`DetectionSink`](crate::sink::DetectionSink); nothing keeps it afterwards.
///
/// `packet_id` is the IPv4 identification field of the offending datagram.
/// It is not a TCP sequence number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectionEvent {
    pub source: Ipv4Addr,
    pub packet_id: u16,
    pub signature: Signature,
}

impl DetectionEvent {
    pub fn new(source: Ipv4Addr, packet_id: u16, signature: Signature) -> Self {
        Self { source, packet_id, signature }
    }

    /// Decode one raw entry of the `DETECTIONS` ring buffer.
    pub fn from_entry(bytes: &[u8]) -> Result<Self, RecordError> {
        let record = DetectionRecord::from_bytes(bytes).ok_or(RecordError::Short(bytes.len()))?;
        Self::try_from(record)
    }
}

/// `<SIG> Packet from <a.b.c.d> having ID <id>`, the detection log line.
impl fmt::Display for DetectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Packet from {} having ID {}", self.signature, self.source, self.packet_id)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    #[error("ring buffer entry has {0} bytes, expected {size}", size = DetectionRecord::SIZE)]
    Short(usize),

    #[error("unknown signature code {0}")]
    UnknownSignature(u8),
}

impl TryFrom<DetectionRecord> for DetectionEvent {
    type Error = RecordError;

    fn try_from(record: DetectionRecord) -> Result<Self, Self::Error> {
        let signature = record
            .signature()
            .ok_or(RecordError::UnknownSignature(record.signature))?;
        Ok(Self::new(Ipv4Addr::from(record.src_octets()), record.packet_id, signature))
    }
}
