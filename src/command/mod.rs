mod commands;
mod history;

use thiserror::Error;

use crate::layer::LayerId;
use crate::shape::ShapeId;

pub use commands::Command;
pub use history::{CommandHistory, DEFAULT_HISTORY_LIMIT};

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors that can occur while undoing or redoing a command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    /// The layer the command applied to has been removed since
    #[error("layer {0} no longer exists")]
    MissingLayer(LayerId),
    #[error("shape {0} is not where the command left it")]
    MissingShape(ShapeId),
}
