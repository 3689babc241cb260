#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod document;
pub mod event;
pub mod id_generator;
pub mod input;
pub mod layer;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod style;
pub mod svg;

pub use app::PaintApp;
pub use canvas::{Canvas, ToolKind};
pub use command::{Command, CommandHistory};
pub use document::Document;
pub use input::{InputEvent, InputHandler, InputLocation};
pub use layer::{Layer, LayerId};
pub use renderer::{PaintSink, RecordingSink, Renderer};
pub use settings::EditorSettings;
pub use shape::{AnyShape, Shape, ShapeId, ShapeType};
pub use style::{Fill, StrokeStyle, Style};
