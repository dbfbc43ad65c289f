//! 最小生成树
//!
//! - Prim：所有节点以"无穷大"（空键）入堆，每次取出键最小的节点并松弛邻边
//! - Kruskal：按权重排序所有边，用并查集跳过成环的边
//!
//! 两者都只依赖权重比较器，不要求权重是数值。

use crate::collections::{BinaryHeap, DisjointSet};
use crate::graph::{Forest, Graph, HashGraph, ReadableGraph, Tree};
use crate::traversal::spanning_tree;
use std::cmp::Ordering;
use std::collections::HashMap;

/// 空键排在所有非空键之后
fn nulls_last<W, C>(compare: &C) -> impl Fn(&Option<W>, &Option<W>) -> Ordering + '_
where
    C: Fn(&W, &W) -> Ordering,
{
    move |a, b| match (a, b) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Prim 最小生成森林：覆盖所有节点，没有父边的节点成为根
pub fn prim_forest<G, C>(graph: &G, compare: C) -> Forest<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    let mut heap = BinaryHeap::from_entries(
        graph.nodes().map(|node| (node.clone(), None)),
        nulls_last(&compare),
    );
    let mut parents: HashMap<G::Node, G::Node> = HashMap::new();
    let mut forest = Forest::new();

    while let Some((node, key)) = heap.dequeue() {
        match (parents.remove(&node), key) {
            // 父节点先出堆，已在森林中
            (Some(parent), Some(weight)) => forest.graft(node.clone(), parent, weight),
            _ => {
                forest.add_root(node.clone());
            }
        }

        let Some(adj) = graph.adj(&node) else {
            continue;
        };
        for (next, weight) in adj {
            let improves = match heap.key(next) {
                None => false,
                Some(None) => true,
                Some(Some(best)) => compare(weight, best) == Ordering::Less,
            };
            if improves {
                parents.insert(next.clone(), node.clone());
                heap.update_decreased(next, Some(weight.clone()));
            }
        }
    }

    tracing::debug!(
        nodes = forest.size(),
        trees = forest.component_count(),
        "prim finished"
    );
    forest
}

/// Prim 最小生成树，以图的第一个节点为根，覆盖根所在的分量
pub fn prim<G, C>(graph: &G, compare: C) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    let Some(root) = graph.nodes().next() else {
        return Tree::empty();
    };
    let forest = prim_forest(graph, compare);
    spanning_tree(&forest, root)
}

/// Kruskal 最小生成树，以图的第一个节点为根，覆盖根所在的分量
///
/// 有向图的边按无向处理。相同权重的边保持图的枚举顺序（稳定排序）。
pub fn kruskal<G, C>(graph: &G, compare: C) -> Tree<G::Node, G::Weight>
where
    G: ReadableGraph + ?Sized,
    G::Weight: Clone,
    C: Fn(&G::Weight, &G::Weight) -> Ordering,
{
    let Some(root) = graph.nodes().next() else {
        return Tree::empty();
    };

    let mut edges = graph.edges();
    edges.sort_by(|x, y| compare(x.weight, y.weight));

    let mut sets = DisjointSet::with_capacity(graph.size());
    let mut chosen = HashGraph::undirected();
    for node in graph.nodes() {
        sets.make_set(node.clone());
        chosen.add(node.clone());
    }
    for edge in edges {
        if sets.union(edge.a, edge.b) {
            chosen.connect(edge.a.clone(), edge.b.clone(), edge.weight.clone());
        }
    }

    tracing::debug!(
        nodes = graph.size(),
        chosen = chosen.edge_count() / 2,
        "kruskal finished"
    );
    spanning_tree(&chosen, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(tree: &Tree<char, u32>) -> u32 {
        tree.weights().into_iter().sum()
    }

    fn classic() -> HashGraph<char, u32> {
        HashGraph::from_edges(
            false,
            [
                ('a', 'b', 4),
                ('a', 'h', 8),
                ('b', 'c', 8),
                ('b', 'h', 11),
                ('c', 'd', 7),
                ('c', 'f', 4),
                ('c', 'i', 2),
                ('d', 'e', 9),
                ('d', 'f', 14),
                ('e', 'f', 10),
                ('f', 'g', 2),
                ('g', 'h', 1),
                ('g', 'i', 6),
                ('h', 'i', 7),
            ],
        )
    }

    #[test]
    fn test_prim_and_kruskal_agree() {
        let g = classic();
        let by_prim = prim(&g, u32::cmp);
        let by_kruskal = kruskal(&g, u32::cmp);
        assert_eq!(by_prim.size(), 9);
        assert_eq!(by_kruskal.size(), 9);
        assert_eq!(by_prim.edge_count(), 8);
        assert_eq!(total(&by_prim), 37);
        assert_eq!(total(&by_kruskal), 37);
        assert_eq!(by_prim.root(), Some(&'a'));
        assert_eq!(by_kruskal.root(), Some(&'a'));
    }

    #[test]
    fn test_empty_graph() {
        let g: HashGraph<char, u32> = HashGraph::undirected();
        assert!(prim(&g, u32::cmp).is_empty());
        assert!(kruskal(&g, u32::cmp).is_empty());
    }

    #[test]
    fn test_disconnected_graph() {
        let mut g = classic();
        g.connect('x', 'y', 3);
        let forest = prim_forest(&g, u32::cmp);
        assert_eq!(forest.component_count(), 2);
        assert_eq!(forest.size(), 11);
        // 树只覆盖根所在的分量
        let tree = prim(&g, u32::cmp);
        assert_eq!(tree.size(), 9);
        assert!(!tree.contains(&'x'));
        let tree = kruskal(&g, u32::cmp);
        assert_eq!(tree.size(), 9);
    }

    #[test]
    fn test_reverse_comparator_gives_maximum_tree() {
        let g = classic();
        let tree = kruskal(&g, |a: &u32, b: &u32| b.cmp(a));
        let heavy = prim(&g, |a: &u32, b: &u32| b.cmp(a));
        assert_eq!(total(&tree), total(&heavy));
        assert!(total(&tree) > 37);
    }

    #[test]
    fn test_weights_need_not_be_numeric() {
        let g = HashGraph::from_edges(false, [(1, 2, "b"), (2, 3, "a"), (1, 3, "c")]);
        let tree = kruskal(&g, |a: &&str, b: &&str| a.cmp(b));
        assert_eq!(tree.edge_count(), 2);
        assert!(!tree.connected(&1, &3) && !tree.connected(&3, &1));
    }
}
