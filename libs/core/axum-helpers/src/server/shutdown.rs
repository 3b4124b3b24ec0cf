use std::sync::Arc;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

/// Shared shutdown state.
///
/// Backed by a `watch` channel holding `true` once shutdown was requested, so
/// a waiter that starts after the request still returns immediately.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    state: Arc<watch::Sender<bool>>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(false);
        Self {
            state: Arc::new(state),
        }
    }

    /// Request shutdown. Only the first call notifies waiters.
    pub fn shutdown(&self) {
        let requested = self.state.send_if_modified(|stopping| {
            if *stopping {
                false
            } else {
                *stopping = true;
                true
            }
        });
        if requested {
            info!("Initiating graceful shutdown");
        }
    }

    /// Resolves once shutdown has been requested, including before this call.
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|stopping| *stopping).await;
    }

    /// Wait for SIGTERM or SIGINT, then request shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received SIGINT (Ctrl+C)"),
            _ = terminate => info!("Received SIGTERM"),
        }

        self.shutdown();
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
