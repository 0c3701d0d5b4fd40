use anyhow::Result;
use tracing::{debug, warn};

pub trait PowerBackend {
    fn set_keep_awake(&mut self, awake: bool) -> Result<()>;
}

#[cfg(windows)]
pub struct ExecutionStateBackend;

#[cfg(windows)]
impl PowerBackend for ExecutionStateBackend {
    fn set_keep_awake(&mut self, awake: bool) -> Result<()> {
        use windows_sys::Win32::System::Power::{
            ES_AWAYMODE_REQUIRED, ES_CONTINUOUS, ES_DISPLAY_REQUIRED, ES_SYSTEM_REQUIRED,
            SetThreadExecutionState,
        };

        let flags = if awake {
            ES_CONTINUOUS | ES_DISPLAY_REQUIRED | ES_SYSTEM_REQUIRED | ES_AWAYMODE_REQUIRED
        } else {
            ES_CONTINUOUS
        };
        // SAFETY: SetThreadExecutionState takes a plain flag value and touches no caller memory.
        let previous = unsafe { SetThreadExecutionState(flags) };
        if previous == 0 {
            anyhow::bail!("SetThreadExecutionState failed");
        }
        Ok(())
    }
}

#[cfg(not(windows))]
pub struct NoopBackend;

#[cfg(not(windows))]
impl PowerBackend for NoopBackend {
    fn set_keep_awake(&mut self, _awake: bool) -> Result<()> {
        Ok(())
    }
}

pub fn platform_backend() -> Box<dyn PowerBackend> {
    #[cfg(windows)]
    {
        Box::new(ExecutionStateBackend)
    }

    #[cfg(not(windows))]
    {
        Box::new(NoopBackend)
    }
}

/// Keeps display and system awake while the window is in the foreground.
pub struct SleepInhibitor {
    backend: Box<dyn PowerBackend>,
    asserted: bool,
}

impl SleepInhibitor {
    pub fn new(backend: Box<dyn PowerBackend>) -> Self {
        Self {
            backend,
            asserted: false,
        }
    }

    /// Re-asserts the state for `foreground` and reports whether it changed.
    pub fn update(&mut self, foreground: bool) -> bool {
        if let Err(err) = self.backend.set_keep_awake(foreground) {
            warn!(error = %err, foreground, "failed to update sleep prevention");
            return false;
        }
        let changed = self.asserted != foreground;
        if changed {
            debug!(keep_awake = foreground, "sleep prevention changed");
        }
        self.asserted = foreground;
        changed
    }

    pub fn is_asserted(&self) -> bool {
        self.asserted
    }

    pub fn release(&mut self) {
        if self.is_asserted() {
            self.update(false);
        }
    }
}

impl Drop for SleepInhibitor {
    fn drop(&mut self) {
        self.release();
    }
}
