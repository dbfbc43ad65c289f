//! 带节点值的图
//!
//! 在 [`HashGraph`] 之上为每个节点附带一个值。
//! 单源最短路径的结果就是这种图：节点值为距离，边 节点 -> 前驱 带原始权重。

use super::distance_path::DistancePath;
use super::hash_graph::HashGraph;
use super::traits::{Graph, ReadableGraph};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::hash::Hash;

/// 带节点值的图
#[derive(Debug, Clone)]
pub struct MapGraph<N, V, W> {
    graph: HashGraph<N, W>,
    values: IndexMap<N, V>,
}

impl<N, V, W> MapGraph<N, V, W> {
    pub fn new() -> Self {
        Self::with_directed(true)
    }

    pub fn with_directed(directed: bool) -> Self {
        Self {
            graph: HashGraph::with_directed(directed),
            values: IndexMap::new(),
        }
    }
}

impl<N, V, W> Default for MapGraph<N, V, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash, V, W: Clone> MapGraph<N, V, W> {
    /// 添加节点并设置值，返回节点是否为新节点
    pub fn add_with(&mut self, node: N, value: V) -> bool {
        let added = self.graph.add(node.clone());
        self.values.insert(node, value);
        added
    }

    /// 设置已有节点的值，节点不存在时返回 `None` 且不修改
    pub fn put(&mut self, node: &N, value: V) -> Option<Option<V>> {
        if !self.graph.contains(node) {
            return None;
        }
        Some(self.values.insert(node.clone(), value))
    }

    pub fn get(&self, node: &N) -> Option<&V> {
        self.values.get(node)
    }

    pub fn values(&self) -> indexmap::map::Values<'_, N, V> {
        self.values.values()
    }

    /// (节点, 值) 对
    pub fn entries(&self) -> indexmap::map::Iter<'_, N, V> {
        self.values.iter()
    }

    pub fn as_graph(&self) -> &HashGraph<N, W> {
        &self.graph
    }
}

impl<N: Clone + Eq + Hash, W: Clone> MapGraph<N, f64, W> {
    /// 到源点的距离；不可达时为 `f64::INFINITY`
    pub fn distance(&self, node: &N) -> Option<f64> {
        self.get(node).copied()
    }

    /// 沿前驱边回溯出从源点到 `target` 的路径；不可达时返回 `None`
    pub fn path_to<F>(&self, target: &N, length: F) -> Option<DistancePath<N, W, F>>
    where
        F: Fn(&W) -> f64,
    {
        if !self.distance(target)?.is_finite() {
            return None;
        }
        let mut path = DistancePath::new(target.clone(), length);
        let mut seen = HashSet::from([target.clone()]);
        let mut current = target.clone();
        while let Some((previous, weight)) = self.graph.adj(&current).and_then(|mut adj| adj.next()) {
            if !seen.insert(previous.clone()) {
                break;
            }
            path.insert_before(0, previous.clone(), weight.clone()).ok()?;
            current = previous.clone();
        }
        Some(path)
    }
}

impl<N: Clone + Eq + Hash, V, W> ReadableGraph for MapGraph<N, V, W> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = <HashGraph<N, W> as ReadableGraph>::Nodes<'a> where Self: 'a;
    type Adj<'a> = <HashGraph<N, W> as ReadableGraph>::Adj<'a> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.graph.nodes()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        self.graph.adj(node)
    }

    fn edge(&self, a: &N, b: &N) -> Option<&W> {
        self.graph.edge(a, b)
    }

    fn contains(&self, node: &N) -> bool {
        self.graph.contains(node)
    }

    fn size(&self) -> usize {
        self.graph.size()
    }

    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn is_directed(&self) -> bool {
        self.graph.is_directed()
    }
}

impl<N: Clone + Eq + Hash, V, W: Clone> Graph for MapGraph<N, V, W> {
    fn add(&mut self, node: N) -> bool {
        self.graph.add(node)
    }

    fn remove(&mut self, node: &N) -> bool {
        self.values.shift_remove(node);
        self.graph.remove(node)
    }

    fn connect(&mut self, a: N, b: N, weight: W) -> Option<W> {
        self.graph.connect(a, b, weight)
    }

    fn disconnect(&mut self, a: &N, b: &N) -> Option<W> {
        self.graph.disconnect(a, b)
    }

    fn disconnect_all(&mut self, node: &N) -> bool {
        self.graph.disconnect_all(node)
    }

    fn set(&mut self, old: &N, now: N) -> bool {
        if !self.graph.set(old, now.clone()) {
            return false;
        }
        if let Some(value) = self.values.shift_remove(old) {
            self.values.entry(now).or_insert(value);
        }
        true
    }

    fn join(&mut self, a: &N, b: &N, into: N) -> bool {
        if !self.graph.join(a, b, into.clone()) {
            return false;
        }
        // b 的值优先于 a 的值，目标节点已有的值保留
        let from_b = if b != &into { self.values.shift_remove(b) } else { None };
        let from_a = if a != &into { self.values.shift_remove(a) } else { None };
        if let Some(value) = from_b.or(from_a) {
            self.values.entry(into).or_insert(value);
        }
        true
    }

    fn clear(&mut self) {
        self.graph.clear();
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_follow_nodes() {
        let mut g: MapGraph<&str, u32, ()> = MapGraph::new();
        assert!(g.add_with("a", 1));
        assert!(!g.add_with("a", 2));
        assert_eq!(g.get(&"a"), Some(&2));
        assert_eq!(g.put(&"zz", 3), None);
        assert_eq!(g.put(&"a", 4), Some(Some(2)));

        g.connect("a", "b", ());
        assert_eq!(g.get(&"b"), None);
        assert!(g.set(&"a", "c"));
        assert_eq!(g.get(&"c"), Some(&4));
        assert!(g.connected(&"c", &"b"));

        assert!(g.remove(&"c"));
        assert_eq!(g.get(&"c"), None);
        assert_eq!(g.values().count(), 0);
    }

    #[test]
    fn test_join_prefers_second_value() {
        let mut g: MapGraph<&str, u32, u8> = MapGraph::new();
        g.add_with("a", 1);
        g.add_with("b", 2);
        g.connect("a", "x", 5);
        assert!(g.join(&"a", &"b", "ab"));
        assert_eq!(g.get(&"ab"), Some(&2));
        assert_eq!(g.entries().count(), 1);
        assert!(g.connected(&"ab", &"x"));
    }

    #[test]
    fn test_path_to_walks_predecessors() {
        // 前驱表：c -> b -> a
        let mut g: MapGraph<char, f64, u32> = MapGraph::new();
        g.add_with('a', 0.0);
        g.add_with('b', 2.0);
        g.add_with('c', 5.0);
        g.add_with('d', f64::INFINITY);
        g.connect('b', 'a', 2);
        g.connect('c', 'b', 3);

        let path = g.path_to(&'c', |w| *w as f64).unwrap();
        assert_eq!(path.as_slice(), &['a', 'b', 'c']);
        assert_eq!(path.distance(), 5.0);
        assert_eq!(g.distance(&'c'), Some(5.0));

        assert!(g.path_to(&'d', |w| *w as f64).is_none());
        assert!(g.path_to(&'q', |w| *w as f64).is_none());
        assert_eq!(g.path_to(&'a', |w| *w as f64).map(|p| p.size()), Some(1));
    }
}
