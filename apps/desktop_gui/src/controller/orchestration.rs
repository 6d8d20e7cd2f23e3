//! Command orchestration helpers from UI actions to backend command queue.

use client_core::StatusMessage;
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` without blocking the frame. The error carries the status
/// line to show instead.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), StatusMessage> {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "backend queue full");
            Err(StatusMessage::error("Too many pending requests; please retry"))
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend worker gone");
            Err(StatusMessage::error(
                "Background worker stopped; restart the app",
            ))
        }
    }
}
