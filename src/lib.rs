//! graphkit - 通用图工具库
//!
//! 可变的有向/无向图存储，以及一组经典图算法：
//! - 图结构：哈希图、树与森林、路径、带节点值的图
//! - 数据结构：支持改键的二叉堆、并查集
//! - 遍历：广度优先、深度优先、连通分量
//! - 算法：最小生成树、任意路径、A*、Dijkstra、Floyd-Warshall、最大流
//!
//! 节点与权重类型都是泛型的，算法通过调用方提供的投影函数把权重解释为长度或容量。

pub mod algorithm;
pub mod cli;
pub mod collections;
pub mod error;
pub mod generators;
pub mod graph;
pub mod import;
pub mod traversal;

// 重导出常用类型
pub use algorithm::{Flow, ShortestPaths};
pub use collections::{BinaryHeap, DisjointSet};
pub use error::{Error, Result};
pub use graph::{DistancePath, Edge, Forest, Graph, HashGraph, MapGraph, Path, ReadableGraph, Tree};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
