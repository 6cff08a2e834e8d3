// src/identity/process.rs
use tokio::runtime::Handle;

/// Runtime facts resolved fresh for each report.
pub trait ProcessInfo: Send + Sync {
    /// `None` when the hostname cannot be resolved.
    fn hostname(&self) -> Option<String>;

    /// Number of live tasks on the current runtime.
    fn active_tasks(&self) -> usize;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessInfo;

impl ProcessInfo for SystemProcessInfo {
    fn hostname(&self) -> Option<String> {
        match hostname::get() {
            Ok(name) => Some(name.to_string_lossy().into_owned()),
            Err(e) => {
                tracing::debug!(%e, "failed to resolve hostname");
                None
            }
        }
    }

    fn active_tasks(&self) -> usize {
        Handle::try_current()
            .map(|handle| handle.metrics().num_alive_tasks())
            .unwrap_or(0)
    }
}
