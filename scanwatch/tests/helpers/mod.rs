#![allow(dead_code)]

use std::net::Ipv4Addr;
use std::sync::Mutex;

use scanwatch::{DetectionEvent, DetectionSink};

/// Sink that keeps every detection for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DetectionEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DetectionEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl DetectionSink for RecordingSink {
    fn emit(&self, event: &DetectionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(*event);
        }
    }
}

/// Builder for IPv4/TCP test packets with sane defaults.
pub struct PacketBuilder {
    pub source: Ipv4Addr,
    pub id: u16,
    pub protocol: u8,
    pub ihl: u8,
    pub frag: u16,
    pub doff: u8,
    pub flags: u8,
    pub seq: u32,
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self {
            source: Ipv4Addr::new(192, 0, 2, 10),
            id: 0x1234,
            protocol: 6,
            ihl: 5,
            frag: 0,
            doff: 5,
            flags: 0,
            seq: 0xDEAD_BEEF,
        }
    }
}

impl PacketBuilder {
    pub fn flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let ip_len = usize::from(self.ihl) * 4;
        let mut p = vec![0u8; ip_len.max(20) + 20];
        p[0] = 0x40 | self.ihl;
        let total = u16::try_from(p.len()).unwrap_or(u16::MAX);
        p[2..4].copy_from_slice(&total.to_be_bytes());
        p[4..6].copy_from_slice(&self.id.to_be_bytes());
        p[6..8].copy_from_slice(&self.frag.to_be_bytes());
        p[8] = 64;
        p[9] = self.protocol;
        p[12..16].copy_from_slice(&self.source.octets());
        p[16..20].copy_from_slice(&[198, 51, 100, 1]);

        let t = ip_len.max(20);
        p[t..t + 2].copy_from_slice(&40000u16.to_be_bytes());
        p[t + 2..t + 4].copy_from_slice(&22u16.to_be_bytes());
        p[t + 4..t + 8].copy_from_slice(&self.seq.to_be_bytes());
        p[t + 12] = self.doff << 4;
        p[t + 13] = self.flags;
        p
    }
}

/// Wrap an IPv4 packet in an Ethernet II frame, optionally VLAN tagged.
pub fn ethernet(packet: &[u8], vlan_tags: &[u16]) -> Vec<u8> {
    let mut frame = vec![0xAA; 6];
    frame.extend_from_slice(&[0xBB; 6]);
    for tag in vlan_tags {
        frame.extend_from_slice(&0x8100u16.to_be_bytes());
        frame.extend_from_slice(&tag.to_be_bytes());
    }
    frame.extend_from_slice(&0x0800u16.to_be_bytes());
    frame.extend_from_slice(packet);
    frame
}
