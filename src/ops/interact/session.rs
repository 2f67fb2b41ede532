//! Interactive session lifecycle.
//!
//! ```text
//! ┌────────────┐  activate   ┌────────┐  begin_close  ┌─────────┐  finish  ┌────────────┐
//! │ Connecting ├────────────►│ Active ├──────────────►│ Closing ├─────────►│ Terminated │
//! └─────┬──────┘             └───┬────┘               └─────────┘          └────────────┘
//!       │         abort          │                                               ▲
//!       └────────────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! The phase is private to the `interact` operation. Only the final
//! [`Termination`] leaves it, as an exit status.

use crate::status::ExitStatus;
use thiserror::Error;

/// Why a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    UserExit,
    DeviceDisconnected,
    Fatal(String),
}

impl Termination {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::UserExit => ExitStatus::SUCCESS,
            Self::DeviceDisconnected => ExitStatus::DEVICE,
            Self::Fatal(_) => ExitStatus::FAILURE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UserExit => "user_exit",
            Self::DeviceDisconnected => "device_disconnected",
            Self::Fatal(_) => "fatal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Connecting,
    Active,
    Closing(Termination),
    Terminated(Termination),
}

impl SessionPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Active => "active",
            Self::Closing(_) => "closing",
            Self::Terminated(_) => "terminated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("illegal session transition: {from} -> {to}")]
    IllegalTransition {
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug)]
pub struct Session {
    phase: SessionPhase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Connecting,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Connecting -> Active.
    pub fn activate(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Connecting => {
                self.phase = SessionPhase::Active;
                Ok(())
            }
            _ => Err(self.illegal("active")),
        }
    }

    /// Active -> Closing.
    pub fn begin_close(&mut self, cause: Termination) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Active => {
                self.phase = SessionPhase::Closing(cause);
                Ok(())
            }
            _ => Err(self.illegal("closing")),
        }
    }

    /// Closing -> Terminated, keeping the cause recorded at `begin_close`.
    pub fn finish(&mut self) -> Result<Termination, SessionError> {
        let cause = match &self.phase {
            SessionPhase::Closing(cause) => cause.clone(),
            _ => return Err(self.illegal("terminated")),
        };
        self.phase = SessionPhase::Terminated(cause.clone());
        Ok(cause)
    }

    /// Connecting/Active/Closing -> Terminated without a clean close.
    pub fn abort(&mut self, cause: Termination) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Terminated(_) => Err(self.illegal("terminated")),
            _ => {
                self.phase = SessionPhase::Terminated(cause);
                Ok(())
            }
        }
    }

    pub fn termination(&self) -> Option<&Termination> {
        match &self.phase {
            SessionPhase::Terminated(cause) => Some(cause),
            _ => None,
        }
    }

    fn illegal(&self, to: &'static str) -> SessionError {
        SessionError::IllegalTransition {
            from: self.phase.label(),
            to,
        }
    }
}
