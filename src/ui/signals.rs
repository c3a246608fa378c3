use crate::error::{ChaosGrabError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct GracefulShutdown {
    running: Arc<AtomicBool>,
    shutdown_message_shown: Arc<AtomicBool>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let shutdown_message_shown = Arc::new(AtomicBool::new(false));

        let running_clone = running.clone();
        let message_shown_clone = shutdown_message_shown.clone();

        // Handle Ctrl+C gracefully
        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);

            if !message_shown_clone.swap(true, Ordering::SeqCst) {
                eprintln!("\n🛑 Gracefully stopping... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\n💀 Force stopping...");
                std::process::exit(1);
            }
        })
        .map_err(|e| ChaosGrabError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self {
            running,
            shutdown_message_shown,
        })
    }

    /// Create a handle with no signal handler registered. `ctrlc` only
    /// allows one handler per process, so tests and embedded callers use
    /// this and drive shutdown through [`request_shutdown`].
    ///
    /// [`request_shutdown`]: GracefulShutdown::request_shutdown
    pub fn detached() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            shutdown_message_shown: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if !self.is_running() {
            return Err(ChaosGrabError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.running.store(true, Ordering::SeqCst);
        self.shutdown_message_shown.store(false, Ordering::SeqCst);
    }

    pub fn with_shutdown_check<F, R>(&self, operation: F) -> Result<R>
    where
        F: FnOnce() -> Result<R>,
    {
        self.check_shutdown()?;
        let result = operation()?;
        self.check_shutdown()?;
        Ok(result)
    }
}

impl Default for GracefulShutdown {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::detached())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_starts_running() {
        let shutdown = GracefulShutdown::detached();
        assert!(shutdown.is_running());
        assert!(shutdown.check_shutdown().is_ok());
    }

    #[test]
    fn test_request_shutdown() {
        let shutdown = GracefulShutdown::detached();
        shutdown.request_shutdown();
        assert!(!shutdown.is_running());
        assert!(matches!(
            shutdown.check_shutdown(),
            Err(ChaosGrabError::Cancelled)
        ));
    }

    #[test]
    fn test_reset() {
        let shutdown = GracefulShutdown::detached();
        shutdown.request_shutdown();
        shutdown.reset();
        assert!(shutdown.is_running());
    }

    #[test]
    fn test_with_shutdown_check_runs_operation() {
        let shutdown = GracefulShutdown::detached();
        let result = shutdown.with_shutdown_check(|| Ok(42));
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn test_with_shutdown_check_aborts_when_stopped() {
        let shutdown = GracefulShutdown::detached();
        shutdown.request_shutdown();
        let result: Result<i32> = shutdown.with_shutdown_check(|| Ok(42));
        assert!(matches!(result, Err(ChaosGrabError::Cancelled)));
    }
}
