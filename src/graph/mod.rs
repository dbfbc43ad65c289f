//! 图核心模块
//!
//! 定义边、图能力接口，以及通用图存储和它的树/森林/路径特化

mod distance_path;
mod edge;
mod forest;
mod hash_graph;
mod map_graph;
mod path;
mod traits;
mod tree;

pub use distance_path::DistancePath;
pub use edge::Edge;
pub use forest::Forest;
pub use hash_graph::HashGraph;
pub use map_graph::MapGraph;
pub use path::{Path, PathTree};
pub use traits::{Graph, ReadableGraph};
pub use tree::Tree;
