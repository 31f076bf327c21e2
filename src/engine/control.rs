use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackCommand {
    Play,
    Pause,
    /// Jump to a position in simulated seconds since the window start.
    SeekTo(f64),
}

pub async fn send_command(state: &AppState, command: PlaybackCommand) -> Result<(), AppError> {
    state
        .command_tx
        .send(command)
        .await
        .map_err(|err| AppError::Internal(format!("playback command send failed: {err}")))?;

    state.metrics.commands_in_queue.inc();
    Ok(())
}
