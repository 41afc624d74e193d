//! Active editing tool.

use crate::shapes::ShapeType;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Square,
    Triangle,
    RightTriangle,
}

impl ToolKind {
    /// Shape placed by this tool, if it is a placement tool.
    pub fn shape_type(self) -> Option<ShapeType> {
        match self {
            ToolKind::Square => Some(ShapeType::Square),
            ToolKind::Triangle => Some(ShapeType::Triangle),
            ToolKind::RightTriangle => Some(ShapeType::RightTriangle),
            ToolKind::Select => None,
        }
    }
}
