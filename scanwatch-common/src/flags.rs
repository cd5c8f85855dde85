/// Bit positions of the control flags in byte 13 of the TCP header.
///
/// ```text
///   7     6     5     4     3     2     1     0
/// +-----+-----+-----+-----+-----+-----+-----+-----+
/// | CWR | ECE | URG | ACK | PSH | RST | SYN | FIN |
/// +-----+-----+-----+-----+-----+-----+-----+-----+
/// ```
///
/// The NS bit (low bit of byte 12) is not part of the vector.
pub mod tcp_flag_bits {
    pub const FIN: u8 = 1 << 0;
    pub const SYN: u8 = 1 << 1;
    pub const RST: u8 = 1 << 2;
    pub const PSH: u8 = 1 << 3;
    pub const ACK: u8 = 1 << 4;
    pub const URG: u8 = 1 << 5;
    pub const ECE: u8 = 1 << 6;
    pub const CWR: u8 = 1 << 7;
}

/// The eight TCP control bits of one packet.
///
/// Built once per packet from the header's flag byte and only read after
/// that. The wrapped byte uses the on-wire bit layout described in
/// [`tcp_flag_bits`], so `from_bits(hdr[13])` is the whole extraction step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FlagVector(u8);

impl FlagVector {
    /// No flag set.
    pub const EMPTY: Self = Self(0);

    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline(always)]
    const fn has(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    #[inline(always)]
    const fn set(self, bit: u8, on: bool) -> Self {
        if on {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }

    #[inline(always)]
    pub const fn syn(self) -> bool {
        self.has(tcp_flag_bits::SYN)
    }
    #[inline(always)]
    pub const fn fin(self) -> bool {
        self.has(tcp_flag_bits::FIN)
    }
    #[inline(always)]
    pub const fn rst(self) -> bool {
        self.has(tcp_flag_bits::RST)
    }
    #[inline(always)]
    pub const fn psh(self) -> bool {
        self.has(tcp_flag_bits::PSH)
    }
    #[inline(always)]
    pub const fn ack(self) -> bool {
        self.has(tcp_flag_bits::ACK)
    }
    #[inline(always)]
    pub const fn urg(self) -> bool {
        self.has(tcp_flag_bits::URG)
    }
    #[inline(always)]
    pub const fn ece(self) -> bool {
        self.has(tcp_flag_bits::ECE)
    }
    #[inline(always)]
    pub const fn cwr(self) -> bool {
        self.has(tcp_flag_bits::CWR)
    }

    pub const fn with_syn(self, on: bool) -> Self {
        self.set(tcp_flag_bits::SYN, on)
    }
    pub const fn with_fin(self, on: bool) -> Self {
        self.set(tcp_flag_bits::FIN, on)
    }
    pub const fn with_rst(self, on: bool) -> Self {
        self.set(tcp_flag_bits::RST, on)
    }
    pub const fn with_psh(self, on: bool) -> Self {
        self.set(tcp_flag_bits::PSH, on)
    }
    pub const fn with_ack(self, on: bool) -> Self {
        self.set(tcp_flag_bits::ACK, on)
    }
    pub const fn with_urg(self, on: bool) -> Self {
        self.set(tcp_flag_bits::URG, on)
    }
    pub const fn with_ece(self, on: bool) -> Self {
        self.set(tcp_flag_bits::ECE, on)
    }
    pub const fn with_cwr(self, on: bool) -> Self {
        self.set(tcp_flag_bits::CWR, on)
    }
}

impl From<u8> for FlagVector {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}
