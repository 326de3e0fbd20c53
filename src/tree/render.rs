//! Tree Rendering
//!
//! Depth-indented text dump of a tree, for inspection.
use crate::data::CategoricalData;
use crate::node::Node;
use std::fmt;

const INDENT: &str = "    ";

/// Render a tree as text.
///
/// An internal node writes its feature, then one line per child with the
/// branch value, indented by depth. Terminal nodes write their label.
/// The dump is always multi-line, even for a single split.
pub fn render<V, L>(node: &Node<V, L>) -> String
where
    V: CategoricalData,
    L: CategoricalData,
{
    node.to_string()
}

impl<V, L> Node<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    fn fmt_depth(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        match self {
            Node::Leaf { label } => writeln!(f, "{}", label),
            Node::Indeterminate {
                feature: Some(feature),
                label,
                ..
            } => writeln!(f, "{} ? {}", feature, label),
            Node::Indeterminate { feature: None, label, .. } => writeln!(f, "? {}", label),
            Node::Internal { feature, children, .. } => {
                writeln!(f, "{} ", feature)?;
                for (value, child) in children {
                    write!(f, "{} {} ", INDENT.repeat(depth + 1), value)?;
                    child.fmt_depth(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl<V, L> fmt::Display for Node<V, L>
where
    V: CategoricalData,
    L: CategoricalData,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_depth(f, 0)
    }
}
