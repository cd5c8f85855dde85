use crate::classify::Signature;

/// One detection, written by the XDP program into the `DETECTIONS` ring
/// buffer and read back by the userspace loader.
///
/// **Layout is shared with the kernel side** (`#[repr(C)]`, asserted below):
///
/// ```text
/// offset 0: src_addr   u32  (network byte order, as read from the IPv4 header)
/// offset 4: packet_id  u16  (IPv4 identification, host byte order)
/// offset 6: signature  u8   (Signature code, 0 = none)
/// offset 7: _pad       u8
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetectionRecord {
    pub src_addr: u32,
    pub packet_id: u16,
    pub signature: u8,
    pub _pad: u8,
}

const _: () = {
    use core::mem::{offset_of, size_of};
    assert!(size_of::<DetectionRecord>() == 8);
    assert!(offset_of!(DetectionRecord, src_addr) == 0);
    assert!(offset_of!(DetectionRecord, packet_id) == 4);
    assert!(offset_of!(DetectionRecord, signature) == 6);
    assert!(offset_of!(DetectionRecord, _pad) == 7);
};

impl DetectionRecord {
    pub const SIZE: usize = core::mem::size_of::<Self>();

    #[inline(always)]
    pub const fn new(src_addr: u32, packet_id: u16, signature: Signature) -> Self {
        Self { src_addr, packet_id, signature: signature.code(), _pad: 0 }
    }

    /// Source address octets in wire order.
    #[inline(always)]
    pub const fn src_octets(&self) -> [u8; 4] {
        self.src_addr.to_ne_bytes()
    }

    pub const fn signature(&self) -> Option<Signature> {
        Signature::from_code(self.signature)
    }

    /// Read a record out of a raw ring buffer entry.
    ///
    /// Returns `None` when the entry is shorter than a record.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: &[u8; Self::SIZE] = bytes.get(..Self::SIZE)?.try_into().ok()?;
        Some(Self {
            src_addr: u32::from_ne_bytes([raw[0], raw[1], raw[2], raw[3]]),
            packet_id: u16::from_ne_bytes([raw[4], raw[5]]),
            signature: raw[6],
            _pad: raw[7],
        })
    }
}

/// Implement `aya::Pod` so the userspace loader can treat ring buffer
/// entries as `DetectionRecord`.
/// Only compiled when the `aya-pod` feature is enabled (i.e. in the userspace crate).
///
/// SAFETY: `DetectionRecord` is `#[repr(C)]`, `Copy`, fully initialized with no implicit padding.
#[cfg(feature = "aya-pod")]
#[allow(unsafe_code)]
unsafe impl aya::Pod for DetectionRecord {}
