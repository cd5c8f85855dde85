use std::sync::Arc;

use tracing::info;

use crate::event::DetectionEvent;

/// Tracing target of detection records, for `RUST_LOG` filtering.
pub const DETECTION_TARGET: &str = "scanwatch::detection";

/// Where detections go.
///
/// Emission is fire-and-forget: implementations swallow their own failures
/// so that reporting can never affect packet delivery. Calls may arrive from
/// several threads with no ordering between packets.
pub trait DetectionSink: Send + Sync {
    fn emit(&self, event: &DetectionEvent);
}

impl<S: DetectionSink + ?Sized> DetectionSink for Arc<S> {
    fn emit(&self, event: &DetectionEvent) {
        (**self).emit(event);
    }
}

impl<S: DetectionSink + ?Sized> DetectionSink for &S {
    fn emit(&self, event: &DetectionEvent) {
        (**self).emit(event);
    }
}

/// Writes each detection as one INFO line through `tracing`.
///
/// The message is exactly the [`DetectionEvent`] display line with no extra
/// fields, so downstream parsers see `SYN Packet from 10.0.0.1 having ID 7`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DetectionSink for LogSink {
    fn emit(&self, event: &DetectionEvent) {
        info!(target: DETECTION_TARGET, "{event}");
    }
}
