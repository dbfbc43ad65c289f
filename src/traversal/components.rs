//! 连通分量、生成树与拓扑距离

use super::breadth_first;
use crate::collections::DisjointSet;
use crate::graph::{Graph, HashGraph, ReadableGraph, Tree};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// 从 `root` 出发的广度优先生成树；`root` 不在图中时返回空树
pub fn spanning_tree<G>(graph: &G, root: &G::Node) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    topological_distance(graph, root).1
}

/// 从 `source` 出发的跳数，以及实现这些跳数的广度优先树
///
/// 不可达的节点不出现在结果中。
pub fn topological_distance<G>(
    graph: &G,
    source: &G::Node,
) -> (IndexMap<G::Node, usize>, Tree<G::Node, G::Weight>)
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    let mut distances = IndexMap::new();
    if !graph.contains(source) {
        return (distances, Tree::empty());
    }

    let mut tree = Tree::with_root(source.clone());
    distances.insert(source.clone(), 0);
    let mut queue = VecDeque::from([source.clone()]);

    while let Some(node) = queue.pop_front() {
        let hops = distances[&node] + 1;
        let Some(adj) = graph.adj(&node) else {
            continue;
        };
        for (next, weight) in adj {
            if distances.contains_key(next) {
                continue;
            }
            distances.insert(next.clone(), hops);
            tree.graft(next.clone(), node.clone(), weight.clone());
            queue.push_back(next.clone());
        }
    }
    (distances, tree)
}

/// 按弱连通性划分节点（有向图忽略边的方向），分量内节点按图的迭代顺序排列
fn partition<G>(graph: &G) -> Vec<Vec<G::Node>>
where
    G: ReadableGraph + ?Sized,
{
    let mut sets = DisjointSet::with_capacity(graph.size());
    for node in graph.nodes() {
        sets.make_set(node.clone());
    }
    graph.for_each_edge(|a, b, _| {
        sets.union(a, b);
    });

    let mut groups: IndexMap<usize, Vec<G::Node>> = IndexMap::new();
    for node in graph.nodes() {
        if let Some(root) = sets.find(node) {
            groups.entry(root).or_default().push(node.clone());
        }
    }
    groups.into_values().collect()
}

fn induced<G>(graph: &G, nodes: Vec<G::Node>) -> HashGraph<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    let mut component = HashGraph::with_directed(graph.is_directed());
    for node in &nodes {
        component.add(node.clone());
    }
    for node in &nodes {
        if let Some(adj) = graph.adj(node) {
            for (next, weight) in adj {
                component.connect(node.clone(), next.clone(), weight.clone());
            }
        }
    }
    component
}

/// 所有连通分量（有向图按弱连通）
pub fn components<G>(graph: &G) -> Vec<HashGraph<G::Node, G::Weight>>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    partition(graph)
        .into_iter()
        .map(|nodes| induced(graph, nodes))
        .collect()
}

/// 包含 `source` 的连通分量；`source` 不在图中时返回空图
pub fn component<G>(graph: &G, source: &G::Node) -> HashGraph<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
{
    if !graph.is_directed() {
        // 无向图中可达集合就是分量，不需要建并查集
        let nodes = breadth_first(graph, source).collect();
        return induced(graph, nodes);
    }
    let nodes = partition(graph)
        .into_iter()
        .find(|nodes| nodes.contains(source))
        .unwrap_or_default();
    induced(graph, nodes)
}

/// 连通分量数量；森林可直接用 `Forest::component_count`
pub fn component_count<G>(graph: &G) -> usize
where
    G: ReadableGraph + ?Sized,
{
    let mut sets = DisjointSet::with_capacity(graph.size());
    for node in graph.nodes() {
        sets.make_set(node.clone());
    }
    graph.for_each_edge(|a, b, _| {
        sets.union(a, b);
    });
    sets.set_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Forest;

    fn two_islands() -> HashGraph<&'static str, u32> {
        HashGraph::from_edges(
            true,
            [("a", "b", 1), ("c", "b", 2), ("x", "y", 3), ("y", "z", 4)],
        )
    }

    #[test]
    fn test_weak_components() {
        let g = two_islands();
        let parts = components(&g);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].size(), 3);
        assert_eq!(parts[0].edge(&"c", &"b"), Some(&2));
        assert_eq!(parts[1].edge_count(), 2);
        assert_eq!(component_count(&g), 2);

        // c 只有出边，仍和 a 属于同一分量
        let part = component(&g, &"c");
        assert!(part.contains(&"a"));
        assert!(component(&g, &"nope").is_empty());
    }

    #[test]
    fn test_undirected_component() {
        let g = HashGraph::from_graph_with(&two_islands(), false);
        let part = component(&g, &"b");
        assert_eq!(part.size(), 3);
        assert!(!part.is_directed());
    }

    #[test]
    fn test_isolated_nodes_count() {
        let mut g = two_islands();
        g.add("lonely");
        assert_eq!(component_count(&g), 3);
        assert_eq!(component_count(&HashGraph::<u8, ()>::new()), 0);
    }

    #[test]
    fn test_forest_component_count_agrees() {
        let mut forest = Forest::new();
        forest.add(2, Some(1), ()).unwrap();
        forest.add(3, Some(1), ()).unwrap();
        forest.add(5, Some(4), ()).unwrap();
        forest.add_root(6);
        assert_eq!(forest.component_count(), 3);
        assert_eq!(component_count(&forest), 3);
    }

    #[test]
    fn test_topological_distance() {
        let g: HashGraph<u32, ()> = HashGraph::from_edges(
            true,
            [(0, 1, ()), (0, 2, ()), (1, 3, ()), (2, 3, ()), (3, 4, ()), (5, 0, ())],
        );
        let (distances, tree) = topological_distance(&g, &0);
        assert_eq!(distances.get(&0), Some(&0));
        assert_eq!(distances.get(&3), Some(&2));
        assert_eq!(distances.get(&4), Some(&3));
        assert_eq!(distances.get(&5), None);
        assert_eq!(tree.parent(&3), Some(&1));
        assert_eq!(tree.size(), 5);

        let (distances, tree) = topological_distance(&g, &42);
        assert!(distances.is_empty());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_spanning_tree_of_undirected_grid() {
        let mut g = HashGraph::undirected();
        for i in 0..3u32 {
            for j in 0..3u32 {
                if i + 1 < 3 {
                    g.connect((i, j), (i + 1, j), 1u8);
                }
                if j + 1 < 3 {
                    g.connect((i, j), (i, j + 1), 1u8);
                }
            }
        }
        let tree = spanning_tree(&g, &(0, 0));
        assert_eq!(tree.size(), 9);
        assert_eq!(tree.edge_count(), 8);
        assert_eq!(tree.root(), Some(&(0, 0)));
    }
}
