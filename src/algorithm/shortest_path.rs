//! 带权最短路径
//!
//! - A*：单源单目标，启发函数为 0 时退化为 Dijkstra
//! - Dijkstra：单源到所有节点，结果以前驱图的形式返回
//!
//! 边长度由调用方提供的投影函数给出，要求非负。

use super::any_path::trace;
use crate::collections::BinaryHeap;
use crate::graph::{DistancePath, Graph, MapGraph, ReadableGraph};
use std::collections::HashMap;

/// A* 搜索
///
/// 任一端点不在图中或不可达时返回 `None`。启发函数可采纳（不高估剩余距离）时结果最优。
pub fn a_star<G, F, H>(
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
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }

    let mut distances: HashMap<G::Node, f64> = HashMap::from([(source.clone(), 0.0)]);
    let mut previous: HashMap<G::Node, G::Node> = HashMap::new();
    let mut heap = BinaryHeap::with_comparator(f64::total_cmp);
    heap.enqueue(source.clone(), heuristic(source, target));
    let mut expanded = 0usize;

    while let Some((current, _)) = heap.dequeue() {
        if &current == target {
            tracing::debug!(expanded, "a* reached target");
            let path = trace(graph, source, target, &previous)?;
            return Some(DistancePath::from_path(path, length));
        }
        expanded += 1;

        let base = distances.get(&current).copied().unwrap_or(f64::INFINITY);
        let Some(adj) = graph.adj(&current) else {
            continue;
        };
        for (next, weight) in adj {
            let candidate = base + length(weight);
            let known = distances.get(next).copied().unwrap_or(f64::INFINITY);
            if candidate >= known {
                continue;
            }
            distances.insert(next.clone(), candidate);
            previous.insert(next.clone(), current.clone());
            let key = candidate + heuristic(next, target);
            if !heap.update_decreased(next, key) {
                heap.enqueue(next.clone(), key);
            }
        }
    }

    tracing::debug!(expanded, "a* exhausted without reaching target");
    None
}

/// Dijkstra 单源最短路径
///
/// 结果中每个节点的值是到源点的距离（不可达为 `f64::INFINITY`），
/// 可达节点有一条指向其前驱的边，权重为原图中对应边的权重。
/// 源点不在图中时返回 `None`。
pub fn dijkstra<G, F>(
    graph: &G,
    source: &G::Node,
    length: F,
) -> Option<MapGraph<G::Node, f64, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    F: Fn(&G::Weight) -> f64,
{
    if !graph.contains(source) {
        return None;
    }

    let mut result = MapGraph::with_directed(true);
    for node in graph.nodes() {
        let start = if node == source { 0.0 } else { f64::INFINITY };
        result.add_with(node.clone(), start);
    }
    let mut heap = BinaryHeap::from_entries(
        result.entries().map(|(node, distance)| (node.clone(), *distance)),
        f64::total_cmp,
    );

    let mut settled = 0usize;
    while let Some((current, distance)) = heap.dequeue() {
        // 剩下的都不可达
        if distance.is_infinite() {
            break;
        }
        settled += 1;

        let Some(adj) = graph.adj(&current) else {
            continue;
        };
        for (next, weight) in adj {
            if !heap.contains(next) {
                continue;
            }
            let candidate = distance + length(weight);
            if result.distance(next).is_some_and(|known| candidate < known) {
                result.put(next, candidate);
                result.disconnect_all(next);
                result.connect(next.clone(), current.clone(), weight.clone());
                heap.update_decreased(next, candidate);
            }
        }
    }

    tracing::debug!(settled, nodes = graph.size(), "dijkstra finished");
    Some(result)
}
