use std::fs;
use std::path::Path;

use eframe::egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id_generator;
use crate::layer::{Layer, LayerId};
use crate::shape::Shape;

/// Errors that can occur while saving or loading a document file
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize document: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to access document file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid document data: {0}")]
    InvalidDocument(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk form of a document: its content without history or observers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Version of the application that wrote the file
    pub version: String,
    pub size: Vec2,
    pub background_color: Color32,
    pub layers: Vec<Layer>,
    pub active_layer: Option<LayerId>,
}

impl DocumentFile {
    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a document.
    ///
    /// A dangling active layer falls back to the first layer, and every shape
    /// id is reserved so new shapes never collide with loaded ones.
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let mut file: DocumentFile = serde_json::from_str(json)?;

        if file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Document version {} differs from current version {}",
                file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        if !(file.size.x.is_finite() && file.size.y.is_finite())
            || file.size.x <= 0.0
            || file.size.y <= 0.0
        {
            return Err(PersistenceError::InvalidDocument(format!(
                "page size {}x{} is not positive",
                file.size.x, file.size.y
            )));
        }

        let active_is_member = file
            .active_layer
            .is_some_and(|id| file.layers.iter().any(|layer| layer.id() == id));
        if !active_is_member {
            file.active_layer = file.layers.first().map(Layer::id);
        }

        let shapes = || file.layers.iter().flat_map(|layer| layer.shapes());
        if let Some(shape) = shapes().find(|shape| shape.id().0 > id_generator::MAX_SHAPE_ID) {
            return Err(PersistenceError::InvalidDocument(format!(
                "shape id {} is out of range",
                shape.id()
            )));
        }
        for shape in shapes() {
            id_generator::reserve_through(shape.id().0);
        }

        Ok(file)
    }
}

pub fn write_document(file: &DocumentFile, path: &Path) -> PersistenceResult<()> {
    let json = file.to_json()?;
    fs::write(path, json)?;
    Ok(())
}

pub fn read_document(path: &Path) -> PersistenceResult<DocumentFile> {
    let json = fs::read_to_string(path)?;
    DocumentFile::from_json(&json)
}
