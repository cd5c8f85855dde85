//! XDP loader: the kernel side of the interception hook.
//!
//! [`XdpProbe`] owns the loaded BPF object. Installing it attaches the
//! `scanwatch_xdp` program to one interface, where it classifies every
//! ingress TCP packet and writes matches to the `DETECTIONS` ring buffer.
//! [`pump`] drains that ring buffer into a [`DetectionSink`].

use std::future::Future;

use aya::maps::{MapData, MapError, RingBuf};
use aya::programs::xdp::XdpLinkId;
use aya::programs::{ProgramError, Xdp, XdpFlags};
use aya::Ebpf;
use tokio::io::unix::AsyncFd;
use tracing::{debug, info, warn};

use crate::config::XdpMode;
use crate::error::Result;
use crate::event::DetectionEvent;
use crate::lifecycle::Hook;
use crate::sink::DetectionSink;

/// Raw bytes of the compiled XDP BPF object, embedded at compile time.
/// `include_bytes_aligned!` ensures 8-byte alignment required by aya's ELF parser.
pub static XDP_BPF_BYTES: &[u8] =
    aya::include_bytes_aligned!(concat!(env!("OUT_DIR"), "/scanwatch.bpf.o"));

pub const PROGRAM_NAME: &str = "scanwatch_xdp";
pub const EVENTS_MAP: &str = "DETECTIONS";

#[derive(Debug, thiserror::Error)]
pub enum EbpfError {
    #[error("failed to load BPF object: {0}")]
    Load(#[from] aya::EbpfError),

    #[error("XDP program 'scanwatch_xdp' not found in BPF object")]
    ProgramNotFound,

    #[error("BPF program is not an XDP program: {0}")]
    ProgramType(#[source] ProgramError),

    #[error("failed to load XDP program into kernel: {0}")]
    ProgramLoad(#[source] ProgramError),

    #[error("failed to attach XDP program to interface {interface}: {source}")]
    Attach {
        interface: String,
        #[source]
        source: ProgramError,
    },

    #[error("failed to detach XDP program: {0}")]
    Detach(#[source] ProgramError),

    #[error("map '{0}' not found in BPF object (or already taken)")]
    MapNotFound(&'static str),

    #[error("map 'DETECTIONS' is not a ring buffer: {0}")]
    MapType(#[source] MapError),
}

impl From<XdpMode> for XdpFlags {
    fn from(mode: XdpMode) -> Self {
        match mode {
            XdpMode::Default => XdpFlags::default(),
            XdpMode::Skb => XdpFlags::SKB_MODE,
            XdpMode::Driver => XdpFlags::DRV_MODE,
            XdpMode::Hardware => XdpFlags::HW_MODE,
        }
    }
}

/// The loaded (but not necessarily attached) XDP scan detector.
///
/// Hand it to a [`Controller`](crate::lifecycle::Controller) after taking the
/// event ring buffer with [`take_events`](Self::take_events).
pub struct XdpProbe {
    /// Loaded eBPF object; keeps program and maps alive while the probe exists
    ebpf: Ebpf,
    interface: String,
    mode: XdpMode,
    link: Option<XdpLinkId>,
}

impl XdpProbe {
    /// Load the embedded XDP program into the kernel without attaching it.
    ///
    /// # Parameters
    /// - `interface`: network interface the program will be attached to (e.g., `"eth0"`)
    /// - `mode`: XDP attach mode used by [`Hook::install`]
    pub fn load(interface: &str, mode: XdpMode) -> std::result::Result<Self, EbpfError> {
        raise_memlock_rlimit();

        let mut ebpf = Ebpf::load(XDP_BPF_BYTES)?;
        program_mut(&mut ebpf)?.load().map_err(EbpfError::ProgramLoad)?;
        debug!(interface, ?mode, "XDP scan detector loaded");

        Ok(Self { ebpf, interface: interface.to_string(), mode, link: None })
    }

    /// Take ownership of the `DETECTIONS` ring buffer. Succeeds once.
    pub fn take_events(&mut self) -> std::result::Result<RingBuf<MapData>, EbpfError> {
        let map = self
            .ebpf
            .take_map(EVENTS_MAP)
            .ok_or(EbpfError::MapNotFound(EVENTS_MAP))?;
        RingBuf::try_from(map).map_err(EbpfError::MapType)
    }
}

impl Hook for XdpProbe {
    fn install(&mut self) -> Result<()> {
        if self.link.is_some() {
            return Ok(());
        }
        let program = program_mut(&mut self.ebpf)?;
        let link = program
            .attach(&self.interface, self.mode.into())
            .map_err(|source| EbpfError::Attach { interface: self.interface.clone(), source })?;
        self.link = Some(link);
        info!(interface = %self.interface, mode = ?self.mode, "XDP scan detector attached");
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        let Some(link) = self.link.take() else {
            return Ok(());
        };
        let program = program_mut(&mut self.ebpf)?;
        program.detach(link).map_err(EbpfError::Detach)?;
        info!(interface = %self.interface, "XDP scan detector detached");
        Ok(())
    }
}

fn program_mut(ebpf: &mut Ebpf) -> std::result::Result<&mut Xdp, EbpfError> {
    ebpf.program_mut(PROGRAM_NAME)
        .ok_or(EbpfError::ProgramNotFound)?
        .try_into()
        .map_err(EbpfError::ProgramType)
}

/// Kernels before 5.11 charge BPF maps against RLIMIT_MEMLOCK.
#[allow(unsafe_code)]
fn raise_memlock_rlimit() {
    let rlim = libc::rlimit { rlim_cur: libc::RLIM_INFINITY, rlim_max: libc::RLIM_INFINITY };
    // SAFETY: setrlimit only reads the struct passed by reference.
    let ret = unsafe { libc::setrlimit(libc::RLIMIT_MEMLOCK, &rlim) };
    if ret != 0 {
        debug!(ret, "could not raise RLIMIT_MEMLOCK; continuing");
    }
}

/// Forward ring buffer detections to `sink` until `shutdown` resolves.
///
/// Entries that do not decode are logged and skipped.
pub async fn pump<S, F>(events: RingBuf<MapData>, sink: &S, shutdown: F) -> Result<()>
where
    S: DetectionSink + ?Sized,
    F: Future<Output = ()>,
{
    let mut events = AsyncFd::new(events)?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            () = &mut shutdown => return Ok(()),
            ready = events.readable_mut() => {
                let mut guard = ready?;
                let ring = guard.get_inner_mut();
                while let Some(entry) = ring.next() {
                    match DetectionEvent::from_entry(&entry) {
                        Ok(event) => sink.emit(&event),
                        Err(err) => warn!(%err, "skipping ring buffer entry"),
                    }
                }
                guard.clear_ready();
            }
        }
    }
}
