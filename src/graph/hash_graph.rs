//! 哈希图
//!
//! 基于 `IndexMap` 邻接表的通用图存储，可为有向或无向。
//! 无向模式下 a -> b 与 b -> a 总是成对出现且权重相同，
//! 每个修改操作都维护这一镜像不变量。

use super::traits::{Graph, ReadableGraph};
use indexmap::IndexMap;
use std::fmt;
use std::hash::Hash;

/// 哈希图
///
/// 迭代顺序为插入顺序，因此同一插入序列上的算法结果是确定的。
#[derive(Debug, Clone)]
pub struct HashGraph<N, W> {
    /// 是否为有向图
    directed: bool,
    /// 节点 -> (邻居 -> 权重)
    nodes: IndexMap<N, IndexMap<N, W>>,
}

impl<N, W> HashGraph<N, W> {
    /// 创建空的有向图
    pub fn new() -> Self {
        Self::with_directed(true)
    }

    /// 创建空的无向图
    pub fn undirected() -> Self {
        Self::with_directed(false)
    }

    pub fn with_directed(directed: bool) -> Self {
        Self {
            directed,
            nodes: IndexMap::new(),
        }
    }
}

impl<N, W> Default for HashGraph<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash, W: Clone> HashGraph<N, W> {
    /// 复制任意只读图，保留其方向性
    pub fn from_graph<G>(graph: &G) -> Self
    where
        G: ReadableGraph<Node = N, Weight = W> + ?Sized,
    {
        Self::from_graph_with(graph, graph.is_directed())
    }

    /// 复制任意只读图，使用指定的方向性
    pub fn from_graph_with<G>(graph: &G, directed: bool) -> Self
    where
        G: ReadableGraph<Node = N, Weight = W> + ?Sized,
    {
        let mut copy = Self::with_directed(directed);
        copy.add_all(graph.nodes().cloned());
        graph.for_each_edge(|a, b, w| {
            copy.connect(a.clone(), b.clone(), w.clone());
        });
        copy
    }

    /// 由 (a, b, 权重) 序列构建
    pub fn from_edges<I>(directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, W)>,
    {
        let mut graph = Self::with_directed(directed);
        for (a, b, w) in edges {
            graph.connect(a, b, w);
        }
        graph
    }
}

impl<N: Eq + Hash, W> HashGraph<N, W> {
    /// 节点邻接表的借用视图
    pub fn adjacency(&self, node: &N) -> Option<&IndexMap<N, W>> {
        self.nodes.get(node)
    }
}

impl<N: Clone + Eq + Hash, W> ReadableGraph for HashGraph<N, W> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = indexmap::map::Keys<'a, N, IndexMap<N, W>> where Self: 'a;
    type Adj<'a> = indexmap::map::Iter<'a, N, W> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.nodes.keys()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        self.nodes.get(node).map(|adj| adj.iter())
    }

    fn edge(&self, a: &N, b: &N) -> Option<&W> {
        self.nodes.get(a)?.get(b)
    }

    fn contains(&self, node: &N) -> bool {
        self.nodes.contains_key(node)
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.nodes.values().map(|adj| adj.len()).sum()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }
}

impl<N: Clone + Eq + Hash, W: Clone> Graph for HashGraph<N, W> {
    // ==================== 节点操作 ====================

    fn add(&mut self, node: N) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, IndexMap::new());
        true
    }

    fn remove(&mut self, node: &N) -> bool {
        let Some(adj) = self.nodes.shift_remove(node) else {
            return false;
        };
        if self.directed {
            for other in self.nodes.values_mut() {
                other.shift_remove(node);
            }
        } else {
            // 无向图只有邻居持有指回该节点的边
            for neighbor in adj.keys() {
                if let Some(other) = self.nodes.get_mut(neighbor) {
                    other.shift_remove(node);
                }
            }
        }
        true
    }

    fn set(&mut self, old: &N, now: N) -> bool {
        if old == &now || !self.contains(old) {
            return false;
        }

        let incoming: Vec<(N, W)> = self
            .nodes
            .iter()
            .filter(|(n, _)| *n != old)
            .filter_map(|(n, adj)| adj.get(old).map(|w| (n.clone(), w.clone())))
            .collect();
        let outgoing: Vec<(N, W)> = self.nodes[old]
            .iter()
            .map(|(m, w)| (m.clone(), w.clone()))
            .collect();

        self.add(now.clone());
        // `now` 已有的边优先
        for (n, w) in incoming {
            if !self.connected(&n, &now) {
                self.connect(n, now.clone(), w);
            }
        }
        for (m, w) in outgoing {
            let m = if &m == old { now.clone() } else { m };
            if !self.connected(&now, &m) {
                self.connect(now.clone(), m, w);
            }
        }
        self.remove(old);
        true
    }

    fn join(&mut self, a: &N, b: &N, into: N) -> bool {
        let (has_a, has_b) = (self.contains(a), self.contains(b));
        if !has_a && !has_b {
            return false;
        }
        if a == b || !has_b {
            return self.set(a, into);
        }
        if !has_a {
            return self.set(b, into);
        }

        let merged = |n: &N| if n == a || n == b { into.clone() } else { n.clone() };

        let mut incoming: IndexMap<N, W> = IndexMap::new();
        for (n, adj) in &self.nodes {
            if n == a || n == b {
                continue;
            }
            if let Some(w) = adj.get(b).or_else(|| adj.get(a)) {
                incoming.insert(n.clone(), w.clone());
            }
        }
        // b 的出边后插入，覆盖 a 的同名出边
        let mut outgoing: IndexMap<N, W> = IndexMap::new();
        for source in [a, b] {
            for (m, w) in &self.nodes[source] {
                outgoing.insert(merged(m), w.clone());
            }
        }

        if a != &into {
            self.remove(a);
        }
        if b != &into {
            self.remove(b);
        }
        self.add(into.clone());
        for (n, w) in incoming {
            self.connect(n, into.clone(), w);
        }
        for (m, w) in outgoing {
            self.connect(into.clone(), m, w);
        }
        true
    }

    // ==================== 边操作 ====================

    fn connect(&mut self, a: N, b: N, weight: W) -> Option<W> {
        // 保持起点先于终点的插入顺序
        self.nodes.entry(a.clone()).or_default();
        if !self.directed && a != b {
            self.nodes
                .entry(b.clone())
                .or_default()
                .insert(a.clone(), weight.clone());
        } else {
            self.nodes.entry(b.clone()).or_default();
        }
        self.nodes.entry(a).or_default().insert(b, weight)
    }

    fn disconnect(&mut self, a: &N, b: &N) -> Option<W> {
        let removed = self.nodes.get_mut(a)?.shift_remove(b);
        if !self.directed && removed.is_some() && a != b {
            if let Some(adj) = self.nodes.get_mut(b) {
                adj.shift_remove(a);
            }
        }
        removed
    }

    fn disconnect_all(&mut self, node: &N) -> bool {
        let Some(adj) = self.nodes.get_mut(node) else {
            return false;
        };
        if adj.is_empty() {
            return false;
        }
        let neighbors: Vec<N> = adj.drain(..).map(|(n, _)| n).collect();
        if !self.directed {
            for neighbor in neighbors.iter().filter(|n| *n != node) {
                if let Some(other) = self.nodes.get_mut(neighbor) {
                    other.shift_remove(node);
                }
            }
        }
        true
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<N: Eq + Hash, W: PartialEq> PartialEq for HashGraph<N, W> {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed && self.nodes == other.nodes
    }
}

impl<N: Clone + Eq + Hash, W> fmt::Display for HashGraph<N, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges = self.edge_count();
        if self.directed {
            write!(f, "Directed graph with {} nodes and {} edges", self.size(), edges)
        } else {
            write!(
                f,
                "Graph with {} nodes and {}({}) edges",
                self.size(),
                edges / 2,
                edges
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(directed: bool) -> HashGraph<&'static str, i32> {
        HashGraph::from_edges(
            directed,
            [("a", "b", 1), ("b", "c", 2), ("c", "a", 3), ("c", "d", 4)],
        )
    }

    #[test]
    fn test_connect_and_disconnect() {
        let mut g = HashGraph::new();
        assert_eq!(g.connect("a", "b", 5), None);
        assert!(g.contains(&"a") && g.contains(&"b"));
        assert_eq!(g.edge(&"a", &"b"), Some(&5));
        assert!(g.connected(&"a", &"b"));
        assert!(!g.connected(&"b", &"a"));

        assert_eq!(g.connect("a", "b", 6), Some(5));
        assert_eq!(g.disconnect(&"a", &"b"), Some(6));
        assert_eq!(g.edge(&"a", &"b"), None);
        assert!(!g.connected(&"a", &"b"));
        assert_eq!(g.disconnect(&"a", &"b"), None);
        assert_eq!(g.disconnect(&"x", &"b"), None);
        // 节点仍然保留
        assert_eq!(g.size(), 2);
    }

    #[test]
    fn test_null_weight_edges() {
        let mut g: HashGraph<u8, Option<u32>> = HashGraph::new();
        assert_eq!(g.connect(1, 2, None), None);
        assert!(g.connected(&1, &2));
        assert_eq!(g.edge(&1, &2), Some(&None));
        assert_eq!(g.connect(1, 2, Some(3)), Some(None));
    }

    #[test]
    fn test_undirected_mirror() {
        let mut g = sample(false);
        assert_eq!(g.edge(&"b", &"a"), Some(&1));
        assert_eq!(g.edge_count(), 8);

        g.connect("d", "a", 9);
        assert_eq!(g.edge(&"a", &"d"), Some(&9));

        assert_eq!(g.disconnect(&"a", &"b"), Some(1));
        assert!(!g.connected(&"b", &"a"));

        assert!(g.disconnect_all(&"c"));
        assert!(!g.connected(&"a", &"c"));
        assert!(!g.connected(&"d", &"c"));
        assert_eq!(g.adj(&"c").map(|adj| adj.count()), Some(0));

        assert!(g.remove(&"d"));
        assert!(!g.connected(&"a", &"d"));
        for a in g.nodes() {
            for b in g.nodes() {
                assert_eq!(g.edge(a, b), g.edge(b, a));
            }
        }
    }

    #[test]
    fn test_remove_node_directed() {
        let mut g = sample(true);
        assert!(g.remove(&"c"));
        assert!(!g.remove(&"c"));
        assert_eq!(g.size(), 3);
        assert_eq!(g.edge_count(), 1);
        assert!(g.adj(&"c").is_none());
        assert_eq!(g.adj(&"b").map(|adj| adj.count()), Some(0));
    }

    #[test]
    fn test_disconnect_all_directed_keeps_incoming() {
        let mut g = sample(true);
        assert!(g.disconnect_all(&"c"));
        assert!(!g.disconnect_all(&"c"));
        assert!(g.connected(&"b", &"c"));
        assert!(!g.connected(&"c", &"a"));
    }

    #[test]
    fn test_set_moves_edges_with_precedence() {
        let mut g = sample(true);
        g.connect("x", "a", 100);
        // x 已有 x -> a，c -> a 的边转给 x 后 x 的边保持不变
        assert!(g.set(&"c", "x"));
        assert!(!g.contains(&"c"));
        assert_eq!(g.edge(&"b", &"x"), Some(&2));
        assert_eq!(g.edge(&"x", &"a"), Some(&100));
        assert_eq!(g.edge(&"x", &"d"), Some(&4));

        assert!(!g.set(&"missing", "y"));
        assert!(!g.set(&"x", "x"));
    }

    #[test]
    fn test_set_undirected() {
        let mut g = sample(false);
        assert!(g.set(&"b", "z"));
        assert_eq!(g.edge(&"a", &"z"), Some(&1));
        assert_eq!(g.edge(&"z", &"a"), Some(&1));
        assert_eq!(g.edge(&"c", &"z"), Some(&2));
        assert!(!g.contains(&"b"));
    }

    #[test]
    fn test_join_second_overrides_first() {
        let mut g: HashGraph<&str, i32> =
            HashGraph::from_edges(true, [("s", "a", 1), ("s", "b", 2), ("a", "t", 3), ("b", "t", 4), ("a", "u", 5)]);
        assert!(g.join(&"a", &"b", "ab"));
        assert!(!g.contains(&"a") && !g.contains(&"b"));
        assert_eq!(g.edge(&"s", &"ab"), Some(&2));
        assert_eq!(g.edge(&"ab", &"t"), Some(&4));
        assert_eq!(g.edge(&"ab", &"u"), Some(&5));
    }

    #[test]
    fn test_join_into_existing_member() {
        let mut g: HashGraph<&str, i32> = HashGraph::from_edges(true, [("a", "t", 1), ("b", "t", 2), ("b", "v", 3)]);
        assert!(g.join(&"a", &"b", "a"));
        assert!(g.contains(&"a"));
        assert!(!g.contains(&"b"));
        assert_eq!(g.edge(&"a", &"t"), Some(&2));
        assert_eq!(g.edge(&"a", &"v"), Some(&3));
        assert!(!g.join(&"p", &"q", "r"));
    }

    #[test]
    fn test_bulk_operations() {
        let mut g = sample(true);
        assert!(g.add_all(["e", "f", "a"]));
        assert!(!g.add_all(["e"]));
        assert_eq!(g.size(), 6);
        assert!(g.remove_all(["e", "zz"].iter()));
        assert!(g.retain_all(|n| *n != "f" && *n != "d"));
        let mut nodes: Vec<_> = g.nodes().copied().collect();
        nodes.sort();
        assert_eq!(nodes, vec!["a", "b", "c"]);
        g.clear();
        assert!(g.is_empty());
    }

    #[test]
    fn test_copy_and_equality() {
        let g = sample(true);
        let copy = HashGraph::from_graph(&g);
        assert_eq!(copy, g);
        let undirected = HashGraph::from_graph_with(&g, false);
        assert!(!undirected.is_directed());
        assert_eq!(undirected.edge(&"d", &"c"), Some(&4));
        assert_ne!(undirected, g);
    }

    #[test]
    fn test_display() {
        assert_eq!(sample(true).to_string(), "Directed graph with 4 nodes and 4 edges");
        assert_eq!(sample(false).to_string(), "Graph with 4 nodes and 4(8) edges");
    }

    #[test]
    fn test_edges_and_weights_snapshot() {
        let g = sample(true);
        let mut weights: Vec<i32> = g.weights().into_iter().copied().collect();
        weights.sort();
        assert_eq!(weights, vec![1, 2, 3, 4]);
        assert!(g.edges().iter().any(|e| *e.a == "c" && *e.b == "d" && *e.weight == 4));
    }
}
