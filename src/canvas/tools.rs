use serde::{Deserialize, Serialize};

/// The canvas' interaction modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    /// Click to place points, Enter to commit
    Bezier,
    /// Freehand: every drag position becomes a point
    Pen,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Line,
        ToolKind::Bezier,
        ToolKind::Pen,
        ToolKind::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Line => "Line",
            ToolKind::Bezier => "Bezier",
            ToolKind::Pen => "Pen",
            ToolKind::Text => "Text",
        }
    }

    /// Tools that build a shape over a press-drag-release gesture
    pub fn is_drag_tool(&self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle | ToolKind::Ellipse | ToolKind::Line | ToolKind::Pen
        )
    }
}
