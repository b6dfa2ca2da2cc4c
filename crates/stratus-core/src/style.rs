//! Edge line styles and arrow directions.
//!
//! The line style carries informal meaning for the human reading the picture:
//!
//! | Style    | Reads as                  |
//! |----------|---------------------------|
//! | `Solid`  | synchronous call          |
//! | `Dashed` | asynchronous / queued     |
//! | `Dotted` | observability linkage     |
//! | `Bold`   | emphasized primary path   |

/// Line pattern of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl EdgeStyle {
    /// Graphviz `style` attribute value.
    pub fn to_dot_value(&self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Bold => "bold",
        }
    }
}

/// Which end(s) of an edge carry an arrowhead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    /// Arrowhead at the target (`a >> b`).
    #[default]
    Forward,
    /// Arrowhead at the source (`a << b`).
    Reverse,
    Both,
    /// Plain line (`a - b`).
    None,
}

impl EdgeDirection {
    /// Graphviz `dir` attribute value.
    pub fn to_dot_value(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Reverse => "back",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}
