//! Types shared between the XDP kernel program and the userspace loader.
//!
//! This crate is `no_std` so it can be compiled for both targets:
//! - `bpfel-unknown-none` (kernel-side XDP program)
//! - the host target (userspace `scanwatch` crate)
//!
//! It holds the whole scan classification decision: the eight TCP control
//! bits ([`FlagVector`]), the recognized probe kinds ([`Signature`]) and the
//! [`classify`] decision table. Everything here is allocation-free and
//! panic-free so the BPF verifier accepts it.
//!
//! Enable the `aya-pod` feature in the userspace crate to get the
//! `aya::Pod` impl required for reading [`DetectionRecord`] out of BPF maps.
#![no_std]

mod classify;
mod flags;
mod record;

pub use classify::{classify, Disposition, Signature, SIGNATURE_TABLE};
pub use flags::{tcp_flag_bits, FlagVector};
pub use record::DetectionRecord;
