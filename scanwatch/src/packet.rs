//! Userspace packet entry point.
//!
//! Mirrors what the XDP program does against packet memory, on an in-memory
//! buffer instead: decode IPv4 and TCP, classify the control bits, report a
//! match to the sink and accept the packet.
//!
//! Headers are read through `etherparse` header slices, which validate the
//! version and the declared length fields (IHL, TCP data offset) against the
//! buffer before any derived offset is used.

use etherparse::{
    EtherType, Ethernet2HeaderSlice, IpNumber, Ipv4HeaderSlice, SingleVlanHeaderSlice,
    TcpHeaderSlice,
};
use scanwatch_common::{classify, Disposition, FlagVector};
use thiserror::Error;
use tracing::trace;

use crate::event::DetectionEvent;
use crate::sink::DetectionSink;

/// 802.1Q plus one 802.1ad outer tag, the same depth the XDP program walks.
const MAX_VLAN_TAGS: usize = 2;

/// Why a buffer could not be decoded as the expected header.
///
/// Decode failures are "not applicable" rather than errors: the entry point
/// only traces them and still accepts the packet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("IPv4 header: {0}")]
    Ipv4(#[from] etherparse::err::ipv4::HeaderSliceError),

    #[error("TCP header: {0}")]
    Tcp(#[from] etherparse::err::tcp::HeaderSliceError),
}

/// Read the control bits of a validated TCP header.
pub fn flag_vector(tcp: &TcpHeaderSlice<'_>) -> FlagVector {
    FlagVector::EMPTY
        .with_fin(tcp.fin())
        .with_syn(tcp.syn())
        .with_rst(tcp.rst())
        .with_psh(tcp.psh())
        .with_ack(tcp.ack())
        .with_urg(tcp.urg())
        .with_ece(tcp.ece())
        .with_cwr(tcp.cwr())
}

/// Decode an IPv4 packet and classify it.
///
/// `Ok(None)` means the packet decoded but is not a probe: non-TCP protocol,
/// non-first fragment, or flags that match no signature.
pub fn decode(packet: &[u8]) -> Result<Option<DetectionEvent>, DecodeError> {
    let ip = Ipv4HeaderSlice::from_slice(packet)?;
    if ip.protocol() != IpNumber::TCP {
        return Ok(None);
    }
    // Only the first fragment carries the TCP header
    if ip.fragments_offset().value() != 0 {
        return Ok(None);
    }

    let segment = packet.get(ip.slice().len()..).unwrap_or_default();
    let tcp = TcpHeaderSlice::from_slice(segment)?;

    Ok(classify(flag_vector(&tcp))
        .map(|signature| DetectionEvent::new(ip.source_addr(), ip.identification(), signature)))
}

/// Decide whether an IPv4 packet is a recognized reconnaissance probe.
///
/// `None` covers every "not applicable" case, undecodable headers included.
pub fn inspect(packet: &[u8]) -> Option<DetectionEvent> {
    match decode(packet) {
        Ok(event) => event,
        Err(err) => {
            trace!(%err, "passing packet that does not decode");
            None
        }
    }
}

/// Entry point for a raw IPv4 packet (network header first).
///
/// Reports a detection to `sink` when the packet matches a signature. The
/// packet is always accepted.
pub fn on_packet<S: DetectionSink + ?Sized>(packet: &[u8], sink: &S) -> Disposition {
    if let Some(event) = inspect(packet) {
        sink.emit(&event);
    }
    Disposition::Accept
}

/// Entry point for an Ethernet II frame, with up to two VLAN tags.
///
/// Non-IPv4 frames are accepted without inspection.
pub fn on_frame<S: DetectionSink + ?Sized>(frame: &[u8], sink: &S) -> Disposition {
    match ipv4_payload(frame) {
        Some(packet) => on_packet(packet, sink),
        None => Disposition::Accept,
    }
}

fn ipv4_payload(frame: &[u8]) -> Option<&[u8]> {
    let eth = Ethernet2HeaderSlice::from_slice(frame).ok()?;
    let mut ether_type = eth.ether_type();
    let mut rest = frame.get(eth.slice().len()..)?;

    for _ in 0..MAX_VLAN_TAGS {
        if ether_type != EtherType::VLAN_TAGGED_FRAME && ether_type != EtherType::PROVIDER_BRIDGING {
            break;
        }
        let vlan = SingleVlanHeaderSlice::from_slice(rest).ok()?;
        ether_type = vlan.ether_type();
        rest = rest.get(vlan.slice().len()..)?;
    }

    (ether_type == EtherType::IPV4).then_some(rest)
}
