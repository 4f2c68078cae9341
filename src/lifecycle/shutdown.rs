//! Stop notification for the HTTP listener and test harnesses.

use tokio::sync::broadcast;

/// Why the service is stopping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// SIGTERM or Ctrl+C.
    Signal,
    /// Stopped from code, or the coordinator was dropped.
    Requested,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::Signal => "signal",
            StopReason::Requested => "requested",
        }
    }
}

/// Fans one stop request out to every [`ShutdownListener`].
pub struct Shutdown {
    tx: broadcast::Sender<StopReason>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn listener(&self) -> ShutdownListener {
        ShutdownListener {
            rx: self.tx.subscribe(),
        }
    }

    /// Notify listeners; returns how many were still waiting.
    pub fn stop(&self, reason: StopReason) -> usize {
        self.tx.send(reason).unwrap_or(0)
    }

    pub fn trigger(&self) {
        self.stop(StopReason::Requested);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot receiving half handed to a long-running task.
pub struct ShutdownListener {
    rx: broadcast::Receiver<StopReason>,
}

impl ShutdownListener {
    /// Resolves on the first stop request. A dropped coordinator counts as
    /// [`StopReason::Requested`].
    pub async fn wait(mut self) -> StopReason {
        self.rx.recv().await.unwrap_or(StopReason::Requested)
    }
}
