//! 全源最短路径（Floyd-Warshall）
//!
//! 节点按图的迭代顺序编号，距离和前驱存放在 n×n 的稠密表中。
//! 不可达的节点对在表中为空。

use crate::graph::{DistancePath, Graph, HashGraph, Path, ReadableGraph};
use indexmap::IndexSet;
use std::fmt;

/// 全源最短路径结果
///
/// 保留对原图的借用，路径重构时边权重取自原图。
pub struct ShortestPaths<'g, G, F>
where
    G: ReadableGraph + ?Sized,
{
    graph: &'g G,
    length: F,
    index: IndexSet<G::Node>,
    distance: Vec<Option<f64>>,
    previous: Vec<Option<usize>>,
}

impl<'g, G, F> ShortestPaths<'g, G, F>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    fn slot(&self, i: usize, j: usize) -> usize {
        i * self.index.len() + j
    }

    fn pair(&self, a: &G::Node, b: &G::Node) -> Option<(usize, usize)> {
        Some((self.index.get_index_of(a)?, self.index.get_index_of(b)?))
    }

    /// a 到 b 的最短距离；不可达或节点不存在时返回 `None`
    pub fn distance(&self, a: &G::Node, b: &G::Node) -> Option<f64> {
        let (i, j) = self.pair(a, b)?;
        self.distance[self.slot(i, j)]
    }

    /// a 到 b 的最短路径上 b 的前一个节点
    pub fn previous(&self, a: &G::Node, b: &G::Node) -> Option<&G::Node> {
        let (i, j) = self.pair(a, b)?;
        if i == j {
            return None;
        }
        let k = self.previous[self.slot(i, j)]?;
        self.index.get_index(k)
    }

    /// 重构 a 到 b 的最短路径
    ///
    /// 存在负环时前驱表可能成环，此时返回 `None`。
    pub fn path(&self, a: &G::Node, b: &G::Node) -> Option<DistancePath<G::Node, G::Weight, &F>> {
        let (i, j) = self.pair(a, b)?;
        self.distance[self.slot(i, j)]?;

        let mut path = Path::new(b.clone());
        let mut current = j;
        while current != i {
            let prev = self.previous[self.slot(i, current)]?;
            let (from, to) = (self.index.get_index(prev)?, self.index.get_index(current)?);
            let weight = self.graph.edge(from, to)?.clone();
            if !path.insert_before(0, from.clone(), weight).ok()? {
                return None;
            }
            current = prev;
        }
        Some(DistancePath::from_path(path, &self.length))
    }

    /// 距离图：每个可达的有序节点对 (a, b)，a != b，有一条权重为距离的边
    pub fn distances(&self) -> HashGraph<G::Node, f64> {
        let mut graph = HashGraph::new();
        for node in &self.index {
            graph.add(node.clone());
        }
        for (i, a) in self.index.iter().enumerate() {
            for (j, b) in self.index.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(distance) = self.distance[self.slot(i, j)] {
                    graph.connect(a.clone(), b.clone(), distance);
                }
            }
        }
        graph
    }

    /// 原图
    pub fn graph(&self) -> &'g G {
        self.graph
    }
}

impl<G, F> fmt::Debug for ShortestPaths<'_, G, F>
where
    G: ReadableGraph + ?Sized,
    G::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortestPaths")
            .field("nodes", &self.index)
            .field("distance", &self.distance)
            .finish()
    }
}

/// Floyd-Warshall，O(n³)
pub fn floyd_warshall<G, F>(graph: &G, length: F) -> ShortestPaths<'_, G, F>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    let index: IndexSet<G::Node> = graph.nodes().cloned().collect();
    let n = index.len();
    let mut distance = vec![None; n * n];
    let mut previous = vec![None; n * n];

    for i in 0..n {
        distance[i * n + i] = Some(0.0);
    }
    graph.for_each_edge(|a, b, weight| {
        let (Some(i), Some(j)) = (index.get_index_of(a), index.get_index_of(b)) else {
            return;
        };
        let l = length(weight);
        let slot = i * n + j;
        if distance[slot].map_or(true, |known| l < known) {
            distance[slot] = Some(l);
            previous[slot] = Some(i);
        }
    });

    for k in 0..n {
        for i in 0..n {
            let Some(ik) = distance[i * n + k] else {
                continue;
            };
            for j in 0..n {
                let Some(kj) = distance[k * n + j] else {
                    continue;
                };
                let candidate = ik + kj;
                if distance[i * n + j].map_or(true, |known| candidate < known) {
                    distance[i * n + j] = Some(candidate);
                    previous[i * n + j] = previous[k * n + j];
                }
            }
        }
    }

    tracing::debug!(nodes = n, "floyd-warshall finished");
    ShortestPaths {
        graph,
        length,
        index,
        distance,
        previous,
    }
}
