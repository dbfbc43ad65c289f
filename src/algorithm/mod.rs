//! 图算法模块
//!
//! 每类问题有一个策略枚举，`Default` 即推荐算法；
//! 模块顶层的函数按默认策略调用，`*_with` 变体可以指定策略。
//!
//! 所有算法只依赖 [`ReadableGraph`]，中间结果（生成树、残量图、距离表）
//! 构建在新的图上，不修改输入。

mod all_pairs;
mod any_path;
mod max_flow;
mod mst;
mod shortest_path;

pub use all_pairs::{floyd_warshall, ShortestPaths};
pub use any_path::search;
pub use max_flow::{dinic, edmonds_karp, Flow};
pub use mst::{kruskal, prim, prim_forest};
pub use shortest_path::{a_star, dijkstra};

use crate::error::Result;
use crate::graph::{DistancePath, Forest, HashGraph, MapGraph, Path, ReadableGraph, Tree};
use crate::traversal::TraversalOrder;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

// ==================== 策略 ====================

/// 最小生成树算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MstAlgorithm {
    #[default]
    Prim,
    Kruskal,
}

/// 任意路径搜索方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnyPathAlgorithm {
    /// 跳数最少
    #[default]
    BreadthFirst,
    DepthFirst,
}

/// 单源单目标最短路径算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortestPathAlgorithm {
    #[default]
    AStar,
}

/// 单源最短路径算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SingleSourceAlgorithm {
    #[default]
    Dijkstra,
}

/// 全源最短路径算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllPairsAlgorithm {
    #[default]
    FloydWarshall,
}

/// 最大流算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaxFlowAlgorithm {
    #[default]
    Dinic,
    EdmondsKarp,
}

impl fmt::Display for MaxFlowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxFlowAlgorithm::Dinic => write!(f, "Dinic"),
            MaxFlowAlgorithm::EdmondsKarp => write!(f, "Edmonds-Karp"),
        }
    }
}

impl From<AnyPathAlgorithm> for TraversalOrder {
    fn from(algorithm: AnyPathAlgorithm) -> Self {
        match algorithm {
            AnyPathAlgorithm::BreadthFirst => TraversalOrder::BreadthFirst,
            AnyPathAlgorithm::DepthFirst => TraversalOrder::DepthFirst,
        }
    }
}

// ==================== 最小生成树 ====================

/// 按权重自然顺序的最小生成树
pub fn minimal_spanning_tree<G>(graph: &G) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone + Ord,
{
    minimal_spanning_tree_by(graph, <G::Weight as Ord>::cmp)
}

/// 按比较器的最小生成树
pub fn minimal_spanning_tree_by<G, C>(graph: &G, compare: C) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    minimal_spanning_tree_with(graph, compare, MstAlgorithm::default())
}

pub fn minimal_spanning_tree_with<G, C>(
    graph: &G,
    compare: C,
    algorithm: MstAlgorithm,
) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    match algorithm {
        MstAlgorithm::Prim => prim(graph, compare),
        MstAlgorithm::Kruskal => kruskal(graph, compare),
    }
}

/// 覆盖所有分量的最小生成森林
pub fn minimal_spanning_forest_by<G, C>(graph: &G, compare: C) -> Forest<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    prim_forest(graph, compare)
}

// ==================== 路径 ====================

pub fn any_path<G>(graph: &G, source: &G::Node, target: &G::Node) -> Option<Path<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    any_path_with(graph, source, target, AnyPathAlgorithm::default())
}

pub fn any_path_with<G>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    algorithm: AnyPathAlgorithm,
) -> Option<Path<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    search(graph, source, target, algorithm.into())
}

/// 跳数最少的路径
pub fn shortest_topological_path<G>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
) -> Option<Path<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    search(graph, source, target, TraversalOrder::BreadthFirst)
}

/// 边长度之和最小的路径
pub fn shortest_path<G, F>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    length: F,
) -> Option<DistancePath<G::Node, G::Weight, F>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    shortest_path_with_heuristic(graph, source, target, length, |_, _| 0.0)
}

/// 带启发函数的最短路径，启发函数估计节点到目标的剩余距离
pub fn shortest_path_with_heuristic<G, F, H>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    length: F,
    heuristic: H,
) -> Option<DistancePath<G::Node, G::Weight, F>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
    H: Fn(&G::Node, &G::Node) -> f64,
{
    shortest_path_with(graph, source, target, length, heuristic, ShortestPathAlgorithm::default())
}

pub fn shortest_path_with<G, F, H>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    length: F,
    heuristic: H,
    algorithm: ShortestPathAlgorithm,
) -> Option<DistancePath<G::Node, G::Weight, F>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
    H: Fn(&G::Node, &G::Node) -> f64,
{
    match algorithm {
        ShortestPathAlgorithm::AStar => a_star(graph, source, target, length, heuristic),
    }
}

/// 单源最短路径，见 [`dijkstra`]
pub fn shortest_paths<G, F>(
    graph: &G,
    source: &G::Node,
    length: F,
) -> Option<MapGraph<G::Node, f64, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    shortest_paths_with(graph, source, length, SingleSourceAlgorithm::default())
}

pub fn shortest_paths_with<G, F>(
    graph: &G,
    source: &G::Node,
    length: F,
    algorithm: SingleSourceAlgorithm,
) -> Option<MapGraph<G::Node, f64, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    match algorithm {
        SingleSourceAlgorithm::Dijkstra => dijkstra(graph, source, length),
    }
}

pub fn all_shortest_paths<G, F>(graph: &G, length: F) -> ShortestPaths<'_, G, F>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    all_shortest_paths_with(graph, length, AllPairsAlgorithm::default())
}

pub fn all_shortest_paths_with<G, F>(
    graph: &G,
    length: F,
    algorithm: AllPairsAlgorithm,
) -> ShortestPaths<'_, G, F>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    match algorithm {
        AllPairsAlgorithm::FloydWarshall => floyd_warshall(graph, length),
    }
}

/// 传递闭包：可达的节点对之间有一条权重为最短距离的边
pub fn transitive_closure<G, F>(graph: &G, length: F) -> HashGraph<G::Node, f64>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    all_shortest_paths(graph, length).distances()
}

// ==================== 最大流 ====================

pub fn max_flow<G, F>(graph: &G, source: &G::Node, drain: &G::Node, capacity: F) -> Result<Flow<G::Node>>
where
    G: ReadableGraph + ?Sized,
    G::Node: fmt::Debug,
    F: Fn(&G::Weight) -> f64,
{
    max_flow_with(graph, source, drain, capacity, MaxFlowAlgorithm::default())
}

pub fn max_flow_with<G, F>(
    graph: &G,
    source: &G::Node,
    drain: &G::Node,
    capacity: F,
    algorithm: MaxFlowAlgorithm,
) -> Result<Flow<G::Node>>
where
    G: ReadableGraph + ?Sized,
    G::Node: fmt::Debug,
    F: Fn(&G::Weight) -> f64,
{
    match algorithm {
        MaxFlowAlgorithm::Dinic => dinic(graph, source, drain, capacity),
        MaxFlowAlgorithm::EdmondsKarp => edmonds_karp(graph, source, drain, capacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn sample() -> HashGraph<&'static str, u32> {
        HashGraph::from_edges(
            false,
            [("a", "b", 2), ("b", "c", 3), ("a", "c", 4), ("c", "d", 1)],
        )
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MstAlgorithm::default(), MstAlgorithm::Prim);
        assert_eq!(AnyPathAlgorithm::default(), AnyPathAlgorithm::BreadthFirst);
        assert_eq!(MaxFlowAlgorithm::default(), MaxFlowAlgorithm::Dinic);
        assert_eq!(MaxFlowAlgorithm::EdmondsKarp.to_string(), "Edmonds-Karp");
    }

    #[test]
    fn test_strategy_names_in_json() {
        assert_eq!(serde_json::to_string(&MaxFlowAlgorithm::EdmondsKarp).unwrap(), "\"edmonds-karp\"");
        assert_eq!(serde_json::to_string(&MstAlgorithm::Kruskal).unwrap(), "\"kruskal\"");
        assert_eq!(serde_json::to_string(&AnyPathAlgorithm::DepthFirst).unwrap(), "\"depth-first\"");
        assert_eq!(serde_json::to_string(&ShortestPathAlgorithm::AStar).unwrap(), "\"a-star\"");
        assert_eq!(serde_json::to_string(&AllPairsAlgorithm::FloydWarshall).unwrap(), "\"floyd-warshall\"");
    }

    #[test]
    fn test_spanning_tree_strategies() {
        let g = sample();
        let tree = minimal_spanning_tree(&g);
        let other = minimal_spanning_tree_with(&g, u32::cmp, MstAlgorithm::Kruskal);
        let sum = |t: &Tree<&str, u32>| t.weights().into_iter().sum::<u32>();
        assert_eq!(sum(&tree), 6);
        assert_eq!(sum(&other), 6);

        let mut g = g;
        g.add("lonely");
        let forest = minimal_spanning_forest_by(&g, u32::cmp);
        assert_eq!(forest.component_count(), 2);
    }

    #[test]
    fn test_path_facade() {
        let g = sample();
        let hops = shortest_topological_path(&g, &"a", &"d").unwrap();
        assert_eq!(hops.hops(), 2);
        let weighted = shortest_path(&g, &"a", &"d", |w: &u32| f64::from(*w)).unwrap();
        assert_eq!(weighted.distance(), 5.0);
        let deep = any_path_with(&g, &"a", &"d", AnyPathAlgorithm::DepthFirst).unwrap();
        assert_eq!(deep.last(), &"d");

        let table = shortest_paths(&g, &"a", |w: &u32| f64::from(*w)).unwrap();
        assert_eq!(table.distance(&"d"), Some(5.0));
        let all = all_shortest_paths(&g, |w: &u32| f64::from(*w));
        assert_eq!(all.distance(&"d", &"a"), Some(5.0));
        let closure = transitive_closure(&g, |w: &u32| f64::from(*w));
        assert_eq!(closure.edge_count(), 12);
    }

    #[test]
    fn test_flow_facade() {
        let g = sample();
        let capacity = |w: &u32| f64::from(*w);
        let fast = max_flow(&g, &"a", &"d", capacity).unwrap();
        let slow = max_flow_with(&g, &"a", &"d", capacity, MaxFlowAlgorithm::EdmondsKarp).unwrap();
        assert_eq!(fast.value(), 1.0);
        assert_eq!(slow.value(), fast.value());
    }
}
