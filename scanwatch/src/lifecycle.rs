use tracing::{error, info, warn};

use crate::error::{Result, ScanwatchError};

/// Registration with a packet interception facility.
///
/// `install` starts delivering packets to the detector, `remove` stops it.
/// Both are called only by [`Controller`].
pub trait Hook {
    fn install(&mut self) -> Result<()>;
    fn remove(&mut self) -> Result<()>;
}

/// Owns the single hook registration of the process.
///
/// `start`/`stop` happen once at startup and shutdown, never concurrently
/// with packet processing. A running controller removes its hook on drop.
pub struct Controller<H: Hook> {
    hook: H,
    running: bool,
}

impl<H: Hook> Controller<H> {
    pub fn new(hook: H) -> Self {
        Self { hook, running: false }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(ScanwatchError::AlreadyRunning);
        }
        self.hook.install()?;
        self.running = true;
        info!("scan detector started");
        Ok(())
    }

    /// Remove the hook. On failure the controller stays running so a later
    /// `stop` or the drop can retry.
    pub fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Err(ScanwatchError::NotRunning);
        }
        self.hook.remove()?;
        self.running = false;
        info!("scan detector stopped");
        Ok(())
    }

    /// Stop at the end of a run and hand back the run's own outcome.
    ///
    /// A failed `stop` is logged rather than returned, so it never masks the
    /// error that ended the run.
    pub fn stop_after<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if let Err(err) = self.stop() {
            error!(%err, "failed to stop scan detector");
        }
        outcome
    }
}

impl<H: Hook> Drop for Controller<H> {
    fn drop(&mut self) {
        if self.running {
            if let Err(err) = self.hook.remove() {
                warn!(%err, "failed to remove interception hook on drop");
            }
        }
    }
}
