//! 路径
//!
//! 无重复节点的有序序列，相邻节点之间各有一个权重。
//! 节点序列、权重序列与成员集合在每次修改后都保持一致：
//! `edges.len() + 1 == nodes.len()`，且成员集合恰好是节点序列中的元素。

use super::edge::arrow;
use super::traits::ReadableGraph;
use super::tree::Tree;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// 路径，至少包含一个节点
#[derive(Debug, Clone)]
pub struct Path<N, W> {
    nodes: Vec<N>,
    edges: Vec<W>,
    members: HashSet<N>,
}

impl<N: Clone + Eq + Hash, W> Path<N, W> {
    /// 创建只有起点的路径
    pub fn new(first: N) -> Self {
        Self {
            nodes: vec![first.clone()],
            edges: Vec::new(),
            members: HashSet::from([first]),
        }
    }

    // ==================== 查询 ====================

    pub fn first(&self) -> &N {
        &self.nodes[0]
    }

    pub fn last(&self) -> &N {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    /// 进入第 `index` 个节点的边
    pub fn edge_before(&self, index: usize) -> Option<&W> {
        index.checked_sub(1).and_then(|i| self.edges.get(i))
    }

    /// 离开第 `index` 个节点的边
    pub fn edge_after(&self, index: usize) -> Option<&W> {
        self.edges.get(index)
    }

    /// 节点的下标
    ///
    /// 不在路径中的节点由成员集合 O(1) 排除，否则线性扫描，O(n)。
    /// `edge`、`adj` 和按节点插入/删除都经由这里。
    pub fn index_of(&self, node: &N) -> Option<usize> {
        if !self.members.contains(node) {
            return None;
        }
        self.nodes.iter().position(|n| n == node)
    }

    /// 节点序列
    pub fn as_slice(&self) -> &[N] {
        &self.nodes
    }

    /// 权重序列，第 i 个权重连接第 i 与第 i+1 个节点
    pub fn weights(&self) -> &[W] {
        &self.edges
    }

    /// 边的数量（跳数）
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    // ==================== 修改 ====================

    /// 在末尾追加节点；节点已在路径中时返回 false
    pub fn append(&mut self, node: N, weight: W) -> bool {
        if self.members.contains(&node) {
            return false;
        }
        self.members.insert(node.clone());
        self.nodes.push(node);
        self.edges.push(weight);
        true
    }

    /// 在第 `index` 个节点之前插入，新边连接新节点与原第 `index` 个节点
    pub fn insert_before(&mut self, index: usize, node: N, weight: W) -> Result<bool> {
        self.check_index(index)?;
        if self.members.contains(&node) {
            return Ok(false);
        }
        self.members.insert(node.clone());
        self.nodes.insert(index, node);
        self.edges.insert(index, weight);
        Ok(true)
    }

    /// 在第 `index` 个节点之后插入，新边连接原第 `index` 个节点与新节点
    pub fn insert_after(&mut self, index: usize, node: N, weight: W) -> Result<bool> {
        self.check_index(index)?;
        if self.members.contains(&node) {
            return Ok(false);
        }
        self.members.insert(node.clone());
        self.nodes.insert(index + 1, node);
        self.edges.insert(index, weight);
        Ok(true)
    }

    /// 在 `anchor` 之前插入；`anchor` 不在路径中或 `node` 已存在时返回 false
    pub fn insert_before_node(&mut self, anchor: &N, node: N, weight: W) -> bool {
        match self.index_of(anchor) {
            Some(index) => self.insert_before(index, node, weight).unwrap_or(false),
            None => false,
        }
    }

    /// 在 `anchor` 之后插入；`anchor` 不在路径中或 `node` 已存在时返回 false
    pub fn insert_after_node(&mut self, anchor: &N, node: N, weight: W) -> bool {
        match self.index_of(anchor) {
            Some(index) => self.insert_after(index, node, weight).unwrap_or(false),
            None => false,
        }
    }

    /// 删除第 `index` 个节点，同时删除悬空的那条边
    pub fn remove(&mut self, index: usize) -> Result<N> {
        self.remove_entry(index).map(|(node, _)| node)
    }

    /// 按节点删除；节点不在路径中时返回 false
    pub fn remove_node(&mut self, node: &N) -> Result<bool> {
        match self.index_of(node) {
            Some(index) => self.remove(index).map(|_| true),
            None => Ok(false),
        }
    }

    /// 删除节点并返回它和被删除的边
    pub(crate) fn remove_entry(&mut self, index: usize) -> Result<(N, W)> {
        self.check_index(index)?;
        if self.nodes.len() == 1 {
            return Err(Error::EmptyPath);
        }
        // 删除首节点时去掉它之后的边，否则去掉它之前的边
        let edge = self.edges.remove(index.saturating_sub(1));
        let node = self.nodes.remove(index);
        self.members.remove(&node);
        Ok((node, edge))
    }

    /// 把第 `index` 个节点替换为 `node`，边保持不变
    pub fn set(&mut self, index: usize, node: N) -> Result<bool> {
        self.check_index(index)?;
        if self.members.contains(&node) {
            return Ok(false);
        }
        self.members.remove(&self.nodes[index]);
        self.members.insert(node.clone());
        self.nodes[index] = node;
        Ok(true)
    }

    /// 按节点替换
    pub fn replace(&mut self, old: &N, now: N) -> bool {
        match self.index_of(old) {
            Some(index) => self.set(index, now).unwrap_or(false),
            None => false,
        }
    }

    /// 替换进入第 `index` 个节点的边，返回原权重
    pub fn set_edge_before(&mut self, index: usize, weight: W) -> Result<W> {
        if index == 0 || index > self.edges.len() {
            return Err(Error::index(index, self.nodes.len()));
        }
        Ok(std::mem::replace(&mut self.edges[index - 1], weight))
    }

    /// 替换离开第 `index` 个节点的边，返回原权重
    pub fn set_edge_after(&mut self, index: usize, weight: W) -> Result<W> {
        if index >= self.edges.len() {
            return Err(Error::index(index, self.nodes.len()));
        }
        Ok(std::mem::replace(&mut self.edges[index], weight))
    }

    /// 清空到只剩起点
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.edges.clear();
        self.members.retain(|n| *n == self.nodes[0]);
    }

    /// 以起点为根的单链树视图
    pub fn as_tree(&self) -> PathTree<'_, N, W> {
        PathTree { path: self }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.nodes.len() {
            return Err(Error::index(index, self.nodes.len()));
        }
        Ok(())
    }
}

impl<N: PartialEq, W: PartialEq> PartialEq for Path<N, W> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.edges == other.edges
    }
}

impl<N: Eq + Hash, W: PartialEq> Path<N, W> {
    /// 第一条权重等于 `weight` 的边的下标
    pub fn index_of_edge(&self, weight: &W) -> Option<usize> {
        self.edges.iter().position(|w| w == weight)
    }

    pub fn last_index_of_edge(&self, weight: &W) -> Option<usize> {
        self.edges.iter().rposition(|w| w == weight)
    }
}

impl<N: Clone + Eq + Hash, W> ReadableGraph for Path<N, W> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = std::slice::Iter<'a, N> where Self: 'a;
    type Adj<'a> = std::option::IntoIter<(&'a N, &'a W)> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.nodes.iter()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        let index = self.index_of(node)?;
        let next = self.nodes.get(index + 1).zip(self.edges.get(index));
        Some(next.into_iter())
    }

    fn edge(&self, a: &N, b: &N) -> Option<&W> {
        let index = self.index_of(a)?;
        if self.nodes.get(index + 1) == Some(b) {
            self.edges.get(index)
        } else {
            None
        }
    }

    fn contains(&self, node: &N) -> bool {
        self.members.contains(node)
    }

    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn is_directed(&self) -> bool {
        true
    }
}

impl<N: fmt::Display + Eq + Hash, W: fmt::Display> fmt::Display for Path<N, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nodes[0])?;
        for (node, weight) in self.nodes[1..].iter().zip(&self.edges) {
            write!(f, " {} {}", arrow(weight), node)?;
        }
        Ok(())
    }
}

/// 路径的只读树视图
///
/// 树以路径起点为根，每个节点的唯一子节点是它在路径中的后继。
#[derive(Debug)]
pub struct PathTree<'p, N, W> {
    path: &'p Path<N, W>,
}

impl<'p, N: Clone + Eq + Hash, W: Clone> PathTree<'p, N, W> {
    pub fn root(&self) -> &'p N {
        self.path.first()
    }

    pub fn parent(&self, node: &N) -> Option<&'p N> {
        let index = self.path.index_of(node)?;
        index.checked_sub(1).map(|i| &self.path.nodes[i])
    }

    pub fn children(&self, node: &N) -> Option<&'p N> {
        let index = self.path.index_of(node)?;
        self.path.nodes.get(index + 1)
    }

    /// 视图不可修改
    pub fn add(&self, _node: N, _parent: Option<N>, _weight: W) -> Result<()> {
        Err(Error::ReadOnlyView)
    }

    /// 视图不可修改
    pub fn disconnect(&self, _node: &N) -> Result<bool> {
        Err(Error::ReadOnlyView)
    }

    /// 复制为可修改的树
    pub fn to_tree(&self) -> Tree<N, W> {
        let mut tree = Tree::with_root(self.path.first().clone());
        for (pair, weight) in self.path.nodes.windows(2).zip(&self.path.edges) {
            tree.graft(pair[1].clone(), pair[0].clone(), weight.clone());
        }
        tree
    }
}

impl<'p, N: Clone + Eq + Hash, W> ReadableGraph for PathTree<'p, N, W> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = std::slice::Iter<'a, N> where Self: 'a;
    type Adj<'a> = std::option::IntoIter<(&'a N, &'a W)> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.path.nodes()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        self.path.adj(node)
    }

    fn edge(&self, a: &N, b: &N) -> Option<&W> {
        self.path.edge(a, b)
    }

    fn contains(&self, node: &N) -> bool {
        self.path.contains(node)
    }

    fn size(&self) -> usize {
        self.path.size()
    }

    fn edge_count(&self) -> usize {
        self.path.edge_count()
    }

    fn is_directed(&self) -> bool {
        true
    }
}
