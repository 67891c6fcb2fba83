//! Startup readiness of the synthesis engine.
//!
//! The engine is loaded exactly once when the process starts. The outcome is
//! captured as an immutable [`Readiness`] value that lives in the shared
//! application state for the rest of the process lifetime. A failed load does
//! not stop the server: health checks keep answering and speak requests fail
//! fast until the process is restarted.

use tracing::{error, info};

use super::engine::{LoadOptions, SynthesisEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        matches!(self, Readiness::Ready)
    }

    /// Label reported by the health endpoint.
    pub fn status_label(self) -> &'static str {
        match self {
            Readiness::Ready => "healthy",
            Readiness::NotReady => "unhealthy",
        }
    }
}

/// Load the engine once and record the outcome. Never retries.
pub async fn load_engine(engine: &dyn SynthesisEngine, options: &LoadOptions) -> Readiness {
    info!(engine = engine.name(), "Preloading synthesis models...");
    match engine.load(options).await {
        Ok(()) => {
            info!(
                engine = engine.name(),
                sample_rate = engine.sample_rate(),
                "Synthesis models loaded successfully"
            );
            Readiness::Ready
        }
        Err(e) => {
            error!(engine = engine.name(), error = %e, "Failed to preload synthesis models");
            Readiness::NotReady
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{EngineError, EngineResult, Waveform};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct LoadOnlyEngine {
        fail: bool,
        loads: AtomicUsize,
    }

    #[async_trait]
    impl SynthesisEngine for LoadOnlyEngine {
        fn name(&self) -> &str {
            "load-only"
        }

        async fn load(&self, _options: &LoadOptions) -> EngineResult<()> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(EngineError::Load("weights missing".to_string()))
            } else {
                Ok(())
            }
        }

        async fn generate(&self, _text: &str, _voice_preset: &str) -> EngineResult<Waveform> {
            unreachable!("readiness never generates audio")
        }

        fn sample_rate(&self) -> u32 {
            24_000
        }
    }

    #[tokio::test]
    async fn test_successful_load_is_ready() {
        let engine = LoadOnlyEngine {
            fail: false,
            loads: AtomicUsize::new(0),
        };
        let readiness = load_engine(&engine, &LoadOptions::default()).await;
        assert_eq!(readiness, Readiness::Ready);
        assert_eq!(engine.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_load_is_not_ready_without_retry() {
        let engine = LoadOnlyEngine {
            fail: true,
            loads: AtomicUsize::new(0),
        };
        let readiness = load_engine(&engine, &LoadOptions::default()).await;
        assert_eq!(readiness, Readiness::NotReady);
        assert_eq!(engine.loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Readiness::Ready.status_label(), "healthy");
        assert_eq!(Readiness::NotReady.status_label(), "unhealthy");
        assert!(Readiness::Ready.is_ready());
        assert!(!Readiness::NotReady.is_ready());
    }
}
