//! 任意路径搜索
//!
//! 广度优先搜索得到的是跳数最少的路径；深度优先只保证找到一条路径。
//! 节点在入队时标记，找到目标后立即沿前驱表重构路径。

use crate::graph::{Path, ReadableGraph};
use crate::traversal::TraversalOrder;
use std::collections::{HashMap, HashSet, VecDeque};

/// 从 `source` 到 `target` 的一条路径
///
/// 任一端点不在图中或不可达时返回 `None`；两端相同时返回单节点路径。
pub fn search<G>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    order: TraversalOrder,
) -> Option<Path<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    if !graph.contains(source) || !graph.contains(target) {
        return None;
    }
    if source == target {
        return Some(Path::new(source.clone()));
    }

    let mut visited = HashSet::from([source.clone()]);
    let mut frontier = VecDeque::from([source.clone()]);
    let mut previous: HashMap<G::Node, G::Node> = HashMap::new();

    loop {
        let current = match order {
            TraversalOrder::BreadthFirst => frontier.pop_front(),
            TraversalOrder::DepthFirst => frontier.pop_back(),
        }?;
        let Some(adj) = graph.adj(&current) else {
            continue;
        };
        for (neighbor, _) in adj {
            if !visited.insert(neighbor.clone()) {
                continue;
            }
            previous.insert(neighbor.clone(), current.clone());
            if neighbor == target {
                return trace(graph, source, target, &previous);
            }
            frontier.push_back(neighbor.clone());
        }
    }
}

/// 沿前驱表从 `target` 回溯到 `source`，边权重取自原图
pub(crate) fn trace<G>(
    graph: &G,
    source: &G::Node,
    target: &G::Node,
    previous: &HashMap<G::Node, G::Node>,
) -> Option<Path<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    let mut path = Path::new(target.clone());
    let mut current = target;
    while current != source {
        let prev = previous.get(current)?;
        let weight = graph.edge(prev, current)?.clone();
        // 前驱表成环时节点会重复出现
        if !path.insert_before(0, prev.clone(), weight).ok()? {
            return None;
        }
        current = prev;
    }
    Some(path)
}
