//! Start/stop handle around the subscription loop

use crate::core::runtime::SignalRuntime;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

type RuntimeFactory = dyn Fn() -> SignalRuntime + Send + Sync;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartStatus {
    Started,
    AlreadyRunning,
}

impl StartStatus {
    pub fn message(self) -> &'static str {
        match self {
            StartStatus::Started => "WebSocket client started",
            StartStatus::AlreadyRunning => "WebSocket client already running",
        }
    }
}

/// Owns at most one running subscription loop.
///
/// Each start builds a fresh runtime, so no indicator state survives a
/// restart.
pub struct SignalService {
    factory: Arc<RuntimeFactory>,
    handle: Arc<RwLock<Option<JoinHandle<()>>>>,
}

impl SignalService {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> SignalRuntime + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            handle: Arc::new(RwLock::new(None)),
        }
    }

    /// Spawn the loop unless one is already running
    pub async fn start(&self) -> StartStatus {
        let mut handle = self.handle.write().await;
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            return StartStatus::AlreadyRunning;
        }

        let runtime = (self.factory)();
        *handle = Some(tokio::spawn(runtime.run()));
        info!("Signal service started");
        StartStatus::Started
    }

    /// Abort the running loop, if any
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("Signal service stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
