//! Graceful shutdown coordination.
//!
//! A [`ShutdownSignal`] is cloned into every task that must stop when the
//! process winds down; triggering it wakes all of them at once. The
//! [`ConnectionTracker`] counts in-flight connections so the accept loop
//! can wait for them to drain before exiting.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Broadcast signal that fires once and stays fired.
#[derive(Clone)]
pub struct ShutdownSignal {
    triggered: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    /// Creates a signal that only fires when [`trigger`](Self::trigger) is called.
    #[must_use]
    pub fn new() -> Self {
        Self {
            triggered: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Creates a signal wired to SIGTERM and SIGINT.
    #[must_use]
    pub fn with_os_signals() -> Self {
        let signal = Self::new();

        let trigger = signal.clone();
        tokio::spawn(async move {
            let ctrl_c = tokio::signal::ctrl_c();

            #[cfg(unix)]
            {
                use tokio::signal::unix::{signal, SignalKind};
                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::error!("Failed to install SIGTERM handler: {e}");
                        return;
                    }
                };
                tokio::select! {
                    _ = ctrl_c => tracing::info!("SIGINT received"),
                    _ = sigterm.recv() => tracing::info!("SIGTERM received"),
                }
            }

            #[cfg(not(unix))]
            {
                if ctrl_c.await.is_ok() {
                    tracing::info!("SIGINT received");
                }
            }

            trigger.trigger();
        });

        signal
    }

    /// Fires the signal, waking every waiter.
    pub fn trigger(&self) {
        self.triggered.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Returns `true` once the signal has fired.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Resolves when the signal fires; resolves immediately if it already has.
    pub async fn recv(&self) {
        if self.is_triggered() {
            return;
        }
        let notified = self.notify.notified();
        if self.is_triggered() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts live connections for drain-on-shutdown.
pub(crate) struct ConnectionTracker {
    active: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl ConnectionTracker {
    pub(crate) fn new() -> Self {
        Self {
            active: Arc::new(AtomicUsize::new(0)),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Registers a connection; dropping the token deregisters it.
    pub(crate) fn acquire(&self) -> ConnectionToken {
        self.active.fetch_add(1, Ordering::SeqCst);
        ConnectionToken {
            active: Arc::clone(&self.active),
            idle: Arc::clone(&self.idle),
        }
    }

    pub(crate) fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Resolves once no connections remain.
    pub(crate) async fn wait_for_idle(&self) {
        loop {
            if self.active_connections() == 0 {
                return;
            }
            let notified = self.idle.notified();
            if self.active_connections() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// RAII handle for one tracked connection.
pub(crate) struct ConnectionToken {
    active: Arc<AtomicUsize>,
    idle: Arc<Notify>,
}

impl Drop for ConnectionToken {
    fn drop(&mut self) {
        if self.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}
