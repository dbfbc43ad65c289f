//! 图能力接口
//!
//! - [`ReadableGraph`]：只读查询（邻接、边查找、连通性、枚举、方向性），
//!   所有算法都只依赖这一能力
//! - [`Graph`]：在只读能力之上增加节点与边的修改

use super::edge::Edge;
use std::hash::Hash;

/// 只读图
///
/// 邻接视图以借用的方式返回，生命周期与图本身绑定；
/// `edges()` / `weights()` 返回的是调用时刻的快照。
pub trait ReadableGraph {
    /// 节点类型，按值比较
    type Node: Clone + Eq + Hash;
    /// 边权重类型
    type Weight;

    /// 节点迭代器
    type Nodes<'a>: Iterator<Item = &'a Self::Node>
    where
        Self: 'a;

    /// 单个节点的邻接迭代器：(邻居, 权重)
    type Adj<'a>: Iterator<Item = (&'a Self::Node, &'a Self::Weight)>
    where
        Self: 'a;

    /// 所有节点
    fn nodes(&self) -> Self::Nodes<'_>;

    /// 节点的出边；节点不存在时返回 `None`
    fn adj(&self, node: &Self::Node) -> Option<Self::Adj<'_>>;

    /// a -> b 的边权重
    fn edge(&self, a: &Self::Node, b: &Self::Node) -> Option<&Self::Weight>;

    /// 是否存在 a -> b 的边（与权重取值无关）
    fn connected(&self, a: &Self::Node, b: &Self::Node) -> bool {
        self.edge(a, b).is_some()
    }

    /// 是否包含节点
    fn contains(&self, node: &Self::Node) -> bool;

    /// 节点数量
    fn size(&self) -> usize;

    /// 边数量（无向图中每条边按两个方向各计一次）
    fn edge_count(&self) -> usize {
        self.nodes()
            .filter_map(|n| self.adj(n))
            .map(|adj| adj.count())
            .sum()
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// 是否为有向图
    fn is_directed(&self) -> bool;

    /// 所有边的快照
    fn edges(&self) -> Vec<Edge<&Self::Node, &Self::Weight>> {
        let mut edges = Vec::new();
        self.for_each_edge(|a, b, w| edges.push(Edge::new(a, b, w)));
        edges
    }

    /// 所有权重的快照
    fn weights(&self) -> Vec<&Self::Weight> {
        let mut weights = Vec::new();
        self.for_each_edge(|_, _, w| weights.push(w));
        weights
    }

    /// 对每条边执行动作；无向图中每条边在两个方向上各执行一次
    fn for_each_edge<'a, F>(&'a self, mut action: F)
    where
        F: FnMut(&'a Self::Node, &'a Self::Node, &'a Self::Weight),
    {
        for a in self.nodes() {
            if let Some(adj) = self.adj(a) {
                for (b, w) in adj {
                    action(a, b, w);
                }
            }
        }
    }
}

/// 可修改的图
///
/// 批量操作与逐个调用单元素操作完全等价。
pub trait Graph: ReadableGraph {
    /// 添加节点，返回节点是否为新节点
    fn add(&mut self, node: Self::Node) -> bool;

    /// 删除节点及其所有关联边，返回节点之前是否存在
    fn remove(&mut self, node: &Self::Node) -> bool;

    /// 连接 a -> b，缺失的端点会被自动加入；返回之前的权重
    fn connect(&mut self, a: Self::Node, b: Self::Node, weight: Self::Weight) -> Option<Self::Weight>;

    /// 断开 a -> b，返回被移除的权重
    fn disconnect(&mut self, a: &Self::Node, b: &Self::Node) -> Option<Self::Weight>;

    /// 断开节点的所有出边，返回图是否改变
    fn disconnect_all(&mut self, node: &Self::Node) -> bool;

    /// 用 `now` 替换 `old`：所有出入边转移到 `now`（`now` 已有的边优先），然后删除 `old`
    fn set(&mut self, old: &Self::Node, now: Self::Node) -> bool;

    /// 把 a 和 b 合并为 `into`：冲突时 b 的边覆盖 a 的边；
    /// 之后删除 a 和 b（与 `into` 相同者除外）
    fn join(&mut self, a: &Self::Node, b: &Self::Node, into: Self::Node) -> bool;

    /// 删除所有节点和边
    fn clear(&mut self);

    fn add_all<I>(&mut self, nodes: I) -> bool
    where
        I: IntoIterator<Item = Self::Node>,
    {
        let mut changed = false;
        for node in nodes {
            changed |= self.add(node);
        }
        changed
    }

    fn remove_all<'n, I>(&mut self, nodes: I) -> bool
    where
        I: IntoIterator<Item = &'n Self::Node>,
        Self::Node: 'n,
    {
        let mut changed = false;
        for node in nodes {
            changed |= self.remove(node);
        }
        changed
    }

    /// 只保留满足条件的节点
    fn retain_all<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&Self::Node) -> bool,
    {
        let doomed: Vec<Self::Node> = self.nodes().filter(|n| !keep(*n)).cloned().collect();
        self.remove_all(doomed.iter())
    }
}
