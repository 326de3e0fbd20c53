// Modules
pub mod config;
pub mod data;
pub mod entropy;
pub mod errors;
pub mod gain;
pub mod metric;
pub mod node;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use config::DecisionTreeConfig;
pub use data::{Dataset, Row};
pub use errors::DecisionTreeError;
pub use node::Node;
pub use tree::tree::DecisionTree;
