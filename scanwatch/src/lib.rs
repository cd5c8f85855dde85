// Unsafe is required in one narrow, documented site:
//   - probe.rs: libc::setrlimit FFI call (RLIMIT_MEMLOCK)
// All other unsafe is denied.
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod event;
pub mod lifecycle;
pub mod packet;
#[cfg(all(feature = "ebpf", target_os = "linux"))]
pub mod probe;
pub mod sink;
pub mod telemetry;

pub use config::{load_from_path, Config, LoggingConfig, XdpConfig, XdpMode};
pub use error::{Result, ScanwatchError};
pub use event::{DetectionEvent, RecordError};
pub use lifecycle::{Controller, Hook};
pub use packet::{decode, flag_vector, inspect, on_frame, on_packet, DecodeError};
pub use scanwatch_common::{classify, Disposition, FlagVector, Signature};
pub use sink::{DetectionSink, LogSink, DETECTION_TARGET};
