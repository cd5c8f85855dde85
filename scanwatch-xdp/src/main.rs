//! XDP program for TCP reconnaissance probe detection.
//!
//! Runs at the earliest ingress point of the attached interface, classifies
//! the control bits of every IPv4/TCP packet with
//! [`scanwatch_common::classify`] and pushes a [`DetectionRecord`] into the
//! `DETECTIONS` ring buffer on a match. Every frame is passed on unchanged.
#![no_std]
#![no_main]

use aya_ebpf::{
    macros::{map, xdp},
    maps::RingBuf,
    programs::XdpContext,
};

use core::mem;

use scanwatch_common::{classify, DetectionRecord, Disposition, FlagVector};

// ── Network protocol constants (network byte order on LE host) ──────────────

const ETH_P_IP: u16 = 0x0800_u16.swap_bytes();
const ETH_P_8021Q: u16 = 0x8100_u16.swap_bytes();
const ETH_P_8021AD: u16 = 0x88A8_u16.swap_bytes();

const IP_OFFSET: u16 = 0x1FFF_u16.swap_bytes(); // fragment offset mask

const IPPROTO_TCP: u8 = 6;

// ── Network header definitions ───────────────────────────────────────────────
//
// aya-ebpf-bindings does not include ethernet/IP/TCP headers (those are UAPI
// network headers, not BPF-specific). We define minimal versions here.

#[repr(C)]
struct EthHdr {
    h_dest: [u8; 6],
    h_source: [u8; 6],
    h_proto: u16, // network byte order
}

#[repr(C)]
struct VlanHdr {
    tci: u16,
    encapsulated_proto: u16, // network byte order
}

/// Minimal IPv4 header (no options).
#[repr(C)]
struct IpHdr {
    version_ihl: u8,
    tos: u8,
    tot_len: u16,
    id: u16,       // network byte order
    frag_off: u16, // network byte order; contains DF/MF/offset flags
    ttl: u8,
    protocol: u8,
    check: u16,
    saddr: u32, // network byte order
    daddr: u32, // network byte order
}

impl IpHdr {
    #[inline(always)]
    fn version(&self) -> u8 {
        self.version_ihl >> 4
    }
    #[inline(always)]
    fn ihl(&self) -> u8 {
        self.version_ihl & 0x0F
    }
}

/// Minimal TCP header (fixed 20 bytes).
///
/// `doff_res` is byte 12 (data offset in the high nibble), `flags` is
/// byte 13 and already has the [`FlagVector`] bit layout.
#[repr(C)]
struct TcpHdr {
    source: u16,
    dest: u16,
    seq: u32,
    ack_seq: u32,
    doff_res: u8,
    flags: u8,
    window: u16,
    check: u16,
    urg_ptr: u16,
}

impl TcpHdr {
    #[inline(always)]
    fn doff(&self) -> u8 {
        self.doff_res >> 4
    }
}

const _: () = {
    assert!(mem::size_of::<EthHdr>() == 14);
    assert!(mem::size_of::<IpHdr>() == 20);
    assert!(mem::size_of::<TcpHdr>() == 20);
};

// ── BPF maps ─────────────────────────────────────────────────────────────────

/// 256 KiB of pending detections. A full ring loses the record, never the packet.
#[map]
static DETECTIONS: RingBuf = RingBuf::with_byte_size(256 * 1024, 0);

// ── Packet access helper ─────────────────────────────────────────────────────

/// Returns a const pointer to `T` at `offset` bytes from the start of the
/// packet, or `None` if the access would exceed `data_end`.
///
/// The BPF verifier accepts this pattern (explicit bounds check before cast).
#[inline(always)]
unsafe fn ptr_at<T>(ctx: &XdpContext, offset: usize) -> Option<*const T> {
    let start = ctx.data();
    let end = ctx.data_end();
    let access_end = start.checked_add(offset)?.checked_add(mem::size_of::<T>())?;
    if access_end > end {
        return None;
    }
    Some(start.checked_add(offset)? as *const T)
}

// ── Entry point ──────────────────────────────────────────────────────────────

#[xdp]
pub fn scanwatch_xdp(ctx: XdpContext) -> u32 {
    // Truncated or foreign frames are not an error, they are just not ours.
    let _ = try_scanwatch_xdp(&ctx);
    Disposition::Accept.xdp_action()
}

fn try_scanwatch_xdp(ctx: &XdpContext) -> Result<(), ()> {
    let mut offset = 0usize;

    // ── Ethernet ─────────────────────────────────────────────────────────────
    let eth = unsafe { ptr_at::<EthHdr>(ctx, offset).ok_or(())? };
    offset = offset.saturating_add(mem::size_of::<EthHdr>());

    let mut eth_type = unsafe { (*eth).h_proto };

    // Up to two VLAN tags (QinQ / 802.1ad)
    if eth_type == ETH_P_8021Q || eth_type == ETH_P_8021AD {
        let vlan = unsafe { ptr_at::<VlanHdr>(ctx, offset).ok_or(())? };
        offset = offset.saturating_add(mem::size_of::<VlanHdr>());
        eth_type = unsafe { (*vlan).encapsulated_proto };
    }
    if eth_type == ETH_P_8021Q || eth_type == ETH_P_8021AD {
        let vlan = unsafe { ptr_at::<VlanHdr>(ctx, offset).ok_or(())? };
        offset = offset.saturating_add(mem::size_of::<VlanHdr>());
        eth_type = unsafe { (*vlan).encapsulated_proto };
    }

    if eth_type != ETH_P_IP {
        return Ok(());
    }

    // ── IPv4 ─────────────────────────────────────────────────────────────────
    let ip = unsafe { ptr_at::<IpHdr>(ctx, offset).ok_or(())? };

    if unsafe { (*ip).version() } != 4 {
        return Ok(());
    }
    let ip_hdr_len = unsafe { usize::from((*ip).ihl()).saturating_mul(4) };
    if ip_hdr_len < mem::size_of::<IpHdr>() {
        return Ok(());
    }

    if unsafe { (*ip).protocol } != IPPROTO_TCP {
        return Ok(());
    }

    // Only the first fragment carries the TCP header
    if unsafe { (*ip).frag_off } & IP_OFFSET != 0 {
        return Ok(());
    }

    offset = offset.saturating_add(ip_hdr_len);

    // ── TCP ──────────────────────────────────────────────────────────────────
    let tcp = unsafe { ptr_at::<TcpHdr>(ctx, offset).ok_or(())? };

    if usize::from(unsafe { (*tcp).doff() }).saturating_mul(4) < mem::size_of::<TcpHdr>() {
        return Ok(());
    }

    let flags = FlagVector::from_bits(unsafe { (*tcp).flags });
    let Some(signature) = classify(flags) else {
        return Ok(());
    };

    let record = DetectionRecord::new(
        unsafe { (*ip).saddr },
        u16::from_be(unsafe { (*ip).id }),
        signature,
    );
    DETECTIONS.output(&record, 0).map_err(|_| ())
}

// ── Required for no_std + no_main ────────────────────────────────────────────

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    loop {}
}
