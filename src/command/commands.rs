use super::{CommandError, CommandResult};
use crate::layer::{Layer, LayerId};
use crate::shape::{AnyShape, Shape, ShapeId};

/// One undoable shape-level mutation.
///
/// While a shape is out of its layer (an undone add, or a performed
/// remove) the command owns it in `detached`, so it can be put back at
/// the same index.
#[derive(Debug, Clone)]
pub enum Command {
    AddShape {
        layer_id: LayerId,
        shape_id: ShapeId,
        index: usize,
        detached: Option<AnyShape>,
    },
    RemoveShape {
        layer_id: LayerId,
        shape_id: ShapeId,
        index: usize,
        detached: Option<AnyShape>,
    },
    /// Replace a shape's state; both snapshots share the shape's id
    ModifyShape {
        layer_id: LayerId,
        before: AnyShape,
        after: AnyShape,
    },
}

impl Command {
    /// Record a shape that is already in its layer at `index`
    pub fn add_shape(layer_id: LayerId, shape_id: ShapeId, index: usize) -> Self {
        Command::AddShape {
            layer_id,
            shape_id,
            index,
            detached: None,
        }
    }

    /// Record a shape that was taken out of its layer from `index`
    pub fn remove_shape(layer_id: LayerId, shape: AnyShape, index: usize) -> Self {
        Command::RemoveShape {
            layer_id,
            shape_id: shape.id(),
            index,
            detached: Some(shape),
        }
    }

    pub fn modify_shape(layer_id: LayerId, before: AnyShape, after: AnyShape) -> Self {
        Command::ModifyShape {
            layer_id,
            before,
            after,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddShape { .. } => "add shape",
            Command::RemoveShape { .. } => "remove shape",
            Command::ModifyShape { .. } => "modify shape",
        }
    }

    pub fn layer_id(&self) -> LayerId {
        match self {
            Command::AddShape { layer_id, .. }
            | Command::RemoveShape { layer_id, .. }
            | Command::ModifyShape { layer_id, .. } => *layer_id,
        }
    }

    pub fn shape_id(&self) -> ShapeId {
        match self {
            Command::AddShape { shape_id, .. } | Command::RemoveShape { shape_id, .. } => *shape_id,
            Command::ModifyShape { after, .. } => after.id(),
        }
    }

    /// Revert the command's effect on `layers`
    pub fn undo(&mut self, layers: &mut [Layer]) -> CommandResult {
        match self {
            Command::AddShape {
                layer_id,
                shape_id,
                index,
                detached,
            } => detach(layers, *layer_id, *shape_id, index, detached),
            Command::RemoveShape {
                layer_id,
                shape_id,
                index,
                detached,
            } => attach(layers, *layer_id, *shape_id, *index, detached),
            Command::ModifyShape {
                layer_id, before, ..
            } => replace(layers, *layer_id, before),
        }
    }

    /// Apply the original action again
    pub fn redo(&mut self, layers: &mut [Layer]) -> CommandResult {
        match self {
            Command::AddShape {
                layer_id,
                shape_id,
                index,
                detached,
            } => attach(layers, *layer_id, *shape_id, *index, detached),
            Command::RemoveShape {
                layer_id,
                shape_id,
                index,
                detached,
            } => detach(layers, *layer_id, *shape_id, index, detached),
            Command::ModifyShape {
                layer_id, after, ..
            } => replace(layers, *layer_id, after),
        }
    }
}

fn find_layer(layers: &mut [Layer], id: LayerId) -> Result<&mut Layer, CommandError> {
    layers
        .iter_mut()
        .find(|layer| layer.id() == id)
        .ok_or(CommandError::MissingLayer(id))
}

/// Move the shape from its layer into the command
fn detach(
    layers: &mut [Layer],
    layer_id: LayerId,
    shape_id: ShapeId,
    index: &mut usize,
    detached: &mut Option<AnyShape>,
) -> CommandResult {
    let layer = find_layer(layers, layer_id)?;
    let position = layer
        .index_of(shape_id)
        .ok_or(CommandError::MissingShape(shape_id))?;
    let mut shape = layer
        .remove_shape(shape_id)
        .ok_or(CommandError::MissingShape(shape_id))?;
    shape.set_selected(false);
    *index = position;
    *detached = Some(shape);
    Ok(())
}

/// Move the shape from the command back into its layer
fn attach(
    layers: &mut [Layer],
    layer_id: LayerId,
    shape_id: ShapeId,
    index: usize,
    detached: &mut Option<AnyShape>,
) -> CommandResult {
    let layer = find_layer(layers, layer_id)?;
    let shape = detached
        .take()
        .ok_or(CommandError::MissingShape(shape_id))?;
    layer.insert_shape(index, shape);
    Ok(())
}

fn replace(layers: &mut [Layer], layer_id: LayerId, snapshot: &AnyShape) -> CommandResult {
    let id = snapshot.id();
    let layer = find_layer(layers, layer_id)?;
    let slot = layer.shape_mut(id).ok_or(CommandError::MissingShape(id))?;
    let selected = slot.is_selected();
    *slot = snapshot.clone();
    slot.set_selected(selected);
    Ok(())
}
