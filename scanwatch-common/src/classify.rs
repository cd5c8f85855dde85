use core::fmt;

use crate::flags::{tcp_flag_bits as bits, FlagVector};

/// Reconnaissance probe kinds recognized by [`classify`].
///
/// The discriminants are the on-wire codes stored in
/// [`DetectionRecord::signature`](crate::DetectionRecord). Code 0 is never
/// used so a zeroed record does not decode as a detection.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signature {
    /// No flag set.
    Null = 1,
    /// FIN, PSH and URG set.
    Xmas = 2,
    /// Only SYN set.
    Syn = 3,
    /// Only FIN set.
    Fin = 4,
    /// Only ACK set.
    Ack = 5,
}

impl Signature {
    pub const ALL: [Signature; 5] = [
        Signature::Null,
        Signature::Xmas,
        Signature::Syn,
        Signature::Fin,
        Signature::Ack,
    ];

    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Signature::Null),
            2 => Some(Signature::Xmas),
            3 => Some(Signature::Syn),
            4 => Some(Signature::Fin),
            5 => Some(Signature::Ack),
            _ => None,
        }
    }

    /// Label used in the detection log line.
    pub const fn label(self) -> &'static str {
        match self {
            Signature::Null => "NULL",
            Signature::Xmas => "XMAS",
            Signature::Syn => "SYN",
            Signature::Fin => "FIN",
            Signature::Ack => "ACK",
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision table, in evaluation order: each row is the exact flag byte a
/// packet must carry to match.
pub const SIGNATURE_TABLE: [(Signature, u8); 5] = [
    (Signature::Null, 0),
    (Signature::Xmas, bits::FIN | bits::PSH | bits::URG),
    (Signature::Syn, bits::SYN),
    (Signature::Fin, bits::FIN),
    (Signature::Ack, bits::ACK),
];

/// Classify a packet's control bits.
///
/// Rows of [`SIGNATURE_TABLE`] are tried in order and the first row whose
/// flag byte equals the packet's wins. A row matches only when its bits are
/// set and the other bits of the vector are clear, so SYN+ACK, SYN+FIN or an
/// ECN-marked SYN fall through to `None`.
#[inline(always)]
pub fn classify(flags: FlagVector) -> Option<Signature> {
    let observed = flags.bits();
    for (signature, expected) in SIGNATURE_TABLE {
        if observed == expected {
            return Some(signature);
        }
    }
    None
}

/// What the interception point should do with the packet.
///
/// Detection never influences delivery, so `Accept` is the only value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Accept,
}

impl Disposition {
    /// `XDP_PASS` from `enum xdp_action`.
    pub const XDP_PASS: u32 = 2;

    #[inline(always)]
    pub const fn xdp_action(self) -> u32 {
        match self {
            Disposition::Accept => Self::XDP_PASS,
        }
    }
}
