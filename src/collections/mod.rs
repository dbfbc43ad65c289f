//! 算法依赖的基础容器

mod binary_heap;
mod disjoint_set;

pub use binary_heap::{BinaryHeap, NaturalOrder};
pub use disjoint_set::DisjointSet;
