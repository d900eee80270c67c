//! Startup health-check collaborator.
//!
//! # Invariants
//! - The probe outcome is logged only; it never changes core state.
//! - Failures are not retried.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthError {
    /// Endpoint could not be reached.
    Transport(String),
    /// Endpoint answered with a non-success status.
    Status(u16),
}

impl Display for HealthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "status endpoint unreachable: {message}"),
            Self::Status(code) => write!(f, "status endpoint answered {code}"),
        }
    }
}

impl Error for HealthError {}

/// External status endpoint.
pub trait HealthProbe {
    /// Calls the endpoint and returns its response message.
    fn probe(&self) -> Result<String, HealthError>;
}

/// Runs `probe` once and logs the outcome. Returns whether it succeeded.
pub fn report_health(probe: &dyn HealthProbe) -> bool {
    match probe.probe() {
        Ok(message) => {
            info!(
                "event=health_check module=health status=ok response_chars={}",
                message.chars().count()
            );
            true
        }
        Err(err) => {
            warn!("event=health_check module=health status=error error={err}");
            false
        }
    }
}
