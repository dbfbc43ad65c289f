//! 最大流算法
//!
//! - Edmonds-Karp：残量图上反复用 BFS 找增广路径
//! - Dinic：每个阶段先按 BFS 层次建层次图，再在层次图上求阻塞流
//!
//! 两者共用残量图与净流量图的维护逻辑。残量恰好为 0 的边从残量图中删除。

use super::any_path::search;
use crate::error::{Error, Result};
use crate::graph::{Graph, HashGraph, ReadableGraph};
use crate::traversal::{breadth_first, TraversalOrder};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

/// 最大流结果
///
/// 本身是一张有向图：a -> b 的权重为 a 流向 b 的净流量，只保留正流量。
#[derive(Debug, Clone)]
pub struct Flow<N> {
    value: f64,
    source: N,
    drain: N,
    graph: HashGraph<N, f64>,
    /// 最小割的源侧顶点集
    source_side: HashSet<N>,
}

impl<N: Clone + Eq + Hash> Flow<N> {
    fn trivial(source: &N, drain: &N, value: f64) -> Self {
        Self {
            value,
            source: source.clone(),
            drain: drain.clone(),
            graph: HashGraph::new(),
            source_side: HashSet::new(),
        }
    }

    /// 最大流量值
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn source(&self) -> &N {
        &self.source
    }

    pub fn drain(&self) -> &N {
        &self.drain
    }

    /// a 流向 b 的净流量，没有流量时为 0
    pub fn flow(&self, a: &N, b: &N) -> f64 {
        self.graph.edge(a, b).copied().unwrap_or(0.0)
    }

    /// 最终残量图中从源点可达的顶点
    pub fn source_side(&self) -> &HashSet<N> {
        &self.source_side
    }

    pub fn as_graph(&self) -> &HashGraph<N, f64> {
        &self.graph
    }
}

impl<N: Clone + Eq + Hash> ReadableGraph for Flow<N> {
    type Node = N;
    type Weight = f64;
    type Nodes<'a> = <HashGraph<N, f64> as ReadableGraph>::Nodes<'a> where Self: 'a;
    type Adj<'a> = <HashGraph<N, f64> as ReadableGraph>::Adj<'a> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.graph.nodes()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        self.graph.adj(node)
    }

    fn edge(&self, a: &N, b: &N) -> Option<&f64> {
        self.graph.edge(a, b)
    }

    fn contains(&self, node: &N) -> bool {
        self.graph.contains(node)
    }

    fn size(&self) -> usize {
        self.graph.size()
    }

    fn is_directed(&self) -> bool {
        true
    }
}

impl<N: fmt::Display> fmt::Display for Flow<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flow {} from {} to {}", self.value, self.source, self.drain)
    }
}

/// 残量图与净流量图
struct Network<N> {
    residual: HashGraph<N, f64>,
    flow: HashGraph<N, f64>,
    value: f64,
}

impl<N: Clone + Eq + Hash + fmt::Debug> Network<N> {
    /// 校验容量并建立初始残量图；容量为负或 NaN 时失败
    fn build<G, F>(graph: &G, capacity: F) -> Result<Self>
    where
        G: ReadableGraph<Node = N> + ?Sized,
        F: Fn(&G::Weight) -> f64,
    {
        let mut residual = HashGraph::new();
        let mut flow = HashGraph::new();
        for node in graph.nodes() {
            residual.add(node.clone());
            flow.add(node.clone());
        }

        let mut invalid = None;
        graph.for_each_edge(|a, b, weight| {
            if invalid.is_some() {
                return;
            }
            let c = capacity(weight);
            if c.is_nan() || c < 0.0 {
                invalid = Some(Error::NegativeCapacity {
                    from: format!("{a:?}"),
                    to: format!("{b:?}"),
                    capacity: c,
                });
            } else if c > 0.0 {
                residual.connect(a.clone(), b.clone(), c);
            }
        });
        if let Some(err) = invalid {
            return Err(err);
        }

        Ok(Self {
            residual,
            flow,
            value: 0.0,
        })
    }

    /// 沿路径增广 `amount`
    fn augment(&mut self, nodes: &[N], amount: f64) {
        for pair in nodes.windows(2) {
            let (u, v) = (&pair[0], &pair[1]);
            consume(&mut self.residual, u, v, amount);
            let back = self.residual.edge(v, u).copied().unwrap_or(0.0) + amount;
            self.residual.connect(v.clone(), u.clone(), back);

            let forward = self.flow.disconnect(u, v).unwrap_or(0.0);
            let backward = self.flow.disconnect(v, u).unwrap_or(0.0);
            let net = forward - backward + amount;
            if net > 0.0 {
                self.flow.connect(u.clone(), v.clone(), net);
            } else if net < 0.0 {
                self.flow.connect(v.clone(), u.clone(), -net);
            }
        }
        self.value += amount;
    }

    /// 沿残量图上跳数最少的路径增广一次，没有增广路径时返回 `false`
    fn augment_shortest(&mut self, source: &N, drain: &N) -> bool {
        let Some(path) = search(&self.residual, source, drain, TraversalOrder::BreadthFirst) else {
            return false;
        };
        let amount = bottleneck(path.weights());
        self.augment(path.as_slice(), amount);
        true
    }

    /// 在层次图上求阻塞流，返回增广次数
    ///
    /// 层次图不含反向边，找不到源到汇的路径时即为阻塞流。
    fn blocking_flow(&mut self, mut layered: HashGraph<N, f64>, source: &N, drain: &N) -> usize {
        let mut augmentations = 0;
        while let Some(path) = search(&layered, source, drain, TraversalOrder::BreadthFirst) {
            let amount = bottleneck(path.weights());
            for pair in path.as_slice().windows(2) {
                consume(&mut layered, &pair[0], &pair[1], amount);
            }
            self.augment(path.as_slice(), amount);
            augmentations += 1;
        }
        augmentations
    }

    fn finish(self, source: &N, drain: &N) -> Flow<N> {
        let source_side = breadth_first(&self.residual, source).collect();
        Flow {
            value: self.value,
            source: source.clone(),
            drain: drain.clone(),
            graph: self.flow,
            source_side,
        }
    }
}

/// 从 a -> b 的剩余容量中扣除 `amount`，恰好用尽时删除该边
fn consume<N: Clone + Eq + Hash>(graph: &mut HashGraph<N, f64>, a: &N, b: &N, amount: f64) {
    let remaining = graph.edge(a, b).copied().unwrap_or(0.0) - amount;
    if remaining == 0.0 {
        graph.disconnect(a, b);
    } else {
        graph.connect(a.clone(), b.clone(), remaining);
    }
}

/// 路径上的最小剩余容量
fn bottleneck(weights: &[f64]) -> f64 {
    weights.iter().copied().fold(f64::INFINITY, f64::min)
}

/// 源点与汇点相同或不在图中时的结果
fn degenerate<N: Clone + Eq + Hash>(graph: &HashGraph<N, f64>, source: &N, drain: &N) -> Option<Flow<N>> {
    if source == drain {
        return Some(Flow::trivial(source, drain, f64::INFINITY));
    }
    if !graph.contains(source) || !graph.contains(drain) {
        return Some(Flow::trivial(source, drain, 0.0));
    }
    None
}

/// Edmonds-Karp 最大流
///
/// `capacity` 把边权重投影为容量。容量为负时返回 [`Error::NegativeCapacity`]，
/// 不做任何计算。源点等于汇点时流量为正无穷，任一端点不在图中时流量为 0。
pub fn edmonds_karp<G, F>(graph: &G, source: &G::Node, drain: &G::Node, capacity: F) -> Result<Flow<G::Node>>
where
    G: ReadableGraph + ?Sized,
    G::Node: fmt::Debug,
    F: Fn(&G::Weight) -> f64,
{
    let mut network = Network::build(graph, capacity)?;
    if let Some(flow) = degenerate(&network.residual, source, drain) {
        return Ok(flow);
    }

    let mut augmentations = 0usize;
    while network.augment_shortest(source, drain) {
        augmentations += 1;
    }

    tracing::debug!(augmentations, value = network.value, "edmonds-karp finished");
    Ok(network.finish(source, drain))
}

/// Dinic 最大流，参数与结果同 [`edmonds_karp`]
pub fn dinic<G, F>(graph: &G, source: &G::Node, drain: &G::Node, capacity: F) -> Result<Flow<G::Node>>
where
    G: ReadableGraph + ?Sized,
    G::Node: fmt::Debug,
    F: Fn(&G::Weight) -> f64,
{
    let mut network = Network::build(graph, capacity)?;
    if let Some(flow) = degenerate(&network.residual, source, drain) {
        return Ok(flow);
    }

    let mut phases = 0usize;
    let mut augmentations = 0usize;
    while let Some(layered) = level_graph(&network.residual, source, drain) {
        phases += 1;
        augmentations += network.blocking_flow(layered, source, drain);
    }

    tracing::debug!(phases, augmentations, value = network.value, "dinic finished");
    Ok(network.finish(source, drain))
}

/// 按 BFS 层次建立层次图，只保留从第 i 层指向第 i+1 层的残量边
///
/// 汇点所在层之后的节点不再展开；汇点不可达时返回 `None`。
fn level_graph<N: Clone + Eq + Hash>(
    residual: &HashGraph<N, f64>,
    source: &N,
    drain: &N,
) -> Option<HashGraph<N, f64>> {
    let mut levels: HashMap<N, usize> = HashMap::from([(source.clone(), 0)]);
    let mut queue = VecDeque::from([source.clone()]);
    let mut layered = HashGraph::new();

    while let Some(node) = queue.pop_front() {
        let level = levels[&node];
        if levels.get(drain).is_some_and(|&last| level >= last) {
            break;
        }
        let Some(adj) = residual.adj(&node) else {
            continue;
        };
        for (next, capacity) in adj {
            let next_level = *levels.entry(next.clone()).or_insert_with(|| {
                queue.push_back(next.clone());
                level + 1
            });
            if next_level == level + 1 {
                layered.connect(node.clone(), next.clone(), *capacity);
            }
        }
    }

    levels.contains_key(drain).then_some(layered)
}
