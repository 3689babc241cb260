//! SVG import and export.
//!
//! SVG is a lossy interchange path, separate from the native document
//! format in [`crate::persistence`]. Import understands `rect`, `circle`,
//! `ellipse`, `line`, absolute `path` data and `text`; everything else is
//! skipped.

use std::path::Path;

use thiserror::Error;

use crate::document::{DEFAULT_LAYER_NAME, Document};
use crate::layer::Layer;

pub mod parse;
pub mod write;

#[derive(Error, Debug)]
pub enum SvgError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no <svg> root element")]
    MissingRoot,
}

pub fn export_to_string(document: &Document) -> String {
    write::document_to_svg(document)
}

pub fn try_export_to_file(path: &Path, document: &Document) -> Result<(), SvgError> {
    std::fs::write(path, export_to_string(document))?;
    Ok(())
}

pub fn export_to_file(path: impl AsRef<Path>, document: &Document) -> bool {
    let path = path.as_ref();
    match try_export_to_file(path, document) {
        Ok(()) => {
            log::info!("Exported SVG to {}", path.display());
            true
        }
        Err(err) => {
            log::error!("Failed to export SVG to {}: {}", path.display(), err);
            false
        }
    }
}

/// Replace the document's content with the shapes found in `svg`.
///
/// The document is only cleared once a root element has been found.
/// Returns the number of shapes imported.
pub fn try_import_from_str(svg: &str, document: &mut Document) -> Result<usize, SvgError> {
    let elements = parse::elements(svg);
    let root = elements
        .iter()
        .find(|element| element.name == "svg")
        .ok_or(SvgError::MissingRoot)?;

    document.clear();
    if let Some(size) = parse::page_size(root) {
        document.set_size(size);
    }
    if document.active_layer_id().is_none() {
        document.add_layer(Layer::new(DEFAULT_LAYER_NAME));
    }

    let mut imported = 0;
    for element in &elements {
        match parse::shape_from_element(element) {
            Some(shape) => {
                if document.add_shape(shape).is_some() {
                    imported += 1;
                }
            }
            None if !matches!(element.name, "svg" | "g") => {
                log::debug!("Skipping unsupported SVG element <{}>", element.name);
            }
            None => {}
        }
    }

    document.clear_history();
    Ok(imported)
}

pub fn import_from_str(svg: &str, document: &mut Document) -> bool {
    match try_import_from_str(svg, document) {
        Ok(count) => {
            log::info!("Imported {} shapes from SVG", count);
            true
        }
        Err(err) => {
            log::error!("Failed to import SVG: {}", err);
            false
        }
    }
}

pub fn try_import_from_file(path: &Path, document: &mut Document) -> Result<usize, SvgError> {
    let svg = std::fs::read_to_string(path)?;
    try_import_from_str(&svg, document)
}

/// On failure the document is left untouched
pub fn import_from_file(path: impl AsRef<Path>, document: &mut Document) -> bool {
    let path = path.as_ref();
    match try_import_from_file(path, document) {
        Ok(count) => {
            log::info!("Imported {} shapes from {}", count, path.display());
            true
        }
        Err(err) => {
            log::error!("Failed to import SVG from {}: {}", path.display(), err);
            false
        }
    }
}
