use super::{Command, CommandError};
use crate::layer::Layer;

/// Number of commands kept on each stack unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Manages the history of executed commands for undo/redo functionality
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
    limit: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    /// Creates a new empty command history
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of zero is raised to one
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        Self::evict(&mut self.undo_stack, self.limit);
        Self::evict(&mut self.redo_stack, self.limit);
    }

    /// Push a command that has already been applied
    pub fn record(&mut self, command: Command) {
        log::debug!("Recording {} on {}", command.name(), command.shape_id());
        self.undo_stack.push(command);
        self.redo_stack.clear(); // Clear redo stack when new command is executed
        Self::evict(&mut self.undo_stack, self.limit);
    }

    /// Undo the last executed command.
    ///
    /// A command that can no longer be applied is dropped from the history.
    pub fn undo(&mut self, layers: &mut [Layer]) -> Result<&Command, CommandError> {
        let mut command = self.undo_stack.pop().ok_or(CommandError::NothingToUndo)?;
        command.undo(layers)?;
        self.redo_stack.push(command);
        Self::evict(&mut self.redo_stack, self.limit);
        self.redo_stack.last().ok_or(CommandError::NothingToUndo)
    }

    /// Redo the last undone command
    pub fn redo(&mut self, layers: &mut [Layer]) -> Result<&Command, CommandError> {
        let mut command = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        command.redo(layers)?;
        self.undo_stack.push(command);
        Self::evict(&mut self.undo_stack, self.limit);
        self.undo_stack.last().ok_or(CommandError::NothingToRedo)
    }

    /// Returns true if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear the command history, dropping any shapes the commands still own
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    // Oldest entries sit at the bottom of the stack
    fn evict(stack: &mut Vec<Command>, limit: usize) {
        if stack.len() > limit {
            let excess = stack.len() - limit;
            stack.drain(..excess);
        }
    }
}
