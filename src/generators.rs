//! 图生成器

use crate::error::{Error, Result};
use crate::graph::{Graph, HashGraph, ReadableGraph};
use std::fmt;
use std::hash::Hash;

/// `width` × `height` 的无向网格，节点为 `(x, y)`，边权重为 1
pub fn grid2d(width: usize, height: usize) -> HashGraph<(usize, usize), u32> {
    let mut graph = HashGraph::undirected();
    for x in 0..width {
        for y in 0..height {
            graph.add((x, y));
            if x != 0 {
                graph.connect((x - 1, y), (x, y), 1);
            }
            if y != 0 {
                graph.connect((x, y - 1), (x, y), 1);
            }
        }
    }
    graph
}

/// 自定义节点的网格
///
/// `node` 把坐标映射为节点，所有边使用同一权重。有向网格中相邻节点之间两个方向各有一条边。
/// 生成器对不同坐标返回相同节点时失败。
pub fn grid2d_with<N, W, F>(
    width: usize,
    height: usize,
    mut node: F,
    weight: W,
    directed: bool,
) -> Result<HashGraph<N, W>>
where
    N: Clone + Eq + Hash + fmt::Debug,
    W: Clone,
    F: FnMut(usize, usize) -> N,
{
    let mut graph = HashGraph::with_directed(directed);
    // 按列保存上一列，避免重复调用生成器
    let mut previous: Vec<N> = Vec::with_capacity(height);
    let mut current: Vec<N> = Vec::with_capacity(height);

    for x in 0..width {
        current.clear();
        for y in 0..height {
            let n = node(x, y);
            if !graph.add(n.clone()) {
                return Err(Error::InvalidArgument(format!("生成器返回了重复节点: {n:?}")));
            }
            let mut neighbors = Vec::with_capacity(2);
            if x != 0 {
                neighbors.push(previous[y].clone());
            }
            if y != 0 {
                neighbors.push(current[y - 1].clone());
            }
            for neighbor in neighbors {
                graph.connect(neighbor.clone(), n.clone(), weight.clone());
                if directed {
                    graph.connect(n.clone(), neighbor, weight.clone());
                }
            }
            current.push(n);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    tracing::debug!(width, height, nodes = graph.size(), "grid generated");
    Ok(graph)
}
