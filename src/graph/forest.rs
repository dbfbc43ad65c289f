//! 森林
//!
//! 由若干互不相交的有根树组成，底层共享一个有向 [`HashGraph`] 和一个根集合。
//! 每个非根节点恰有一条入边（指向它的父边）。

use super::hash_graph::HashGraph;
use super::traits::{Graph, ReadableGraph};
use super::tree::Tree;
use crate::error::{Error, Result};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::Hash;

/// 有根森林
#[derive(Debug, Clone)]
pub struct Forest<N, W> {
    graph: HashGraph<N, W>,
    roots: IndexSet<N>,
    /// 子节点 -> 父节点
    parents: HashMap<N, N>,
}

impl<N, W> Forest<N, W> {
    /// 创建空森林
    pub fn new() -> Self {
        Self {
            graph: HashGraph::new(),
            roots: IndexSet::new(),
            parents: HashMap::new(),
        }
    }
}

impl<N, W> Default for Forest<N, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash, W: Clone> Forest<N, W> {
    // ==================== 结构修改 ====================

    /// 把 `node` 挂到 `parent` 之下
    ///
    /// `parent` 为 `None` 或等于 `node` 时 `node` 成为根；
    /// 不在森林中的父节点会先作为新根加入。
    /// 节点原有的父边总是先被断开，子树随节点一起移动。
    pub fn add(&mut self, node: N, parent: Option<N>, weight: W) -> Result<()> {
        let parent = match parent {
            Some(parent) if parent != node => parent,
            _ => {
                self.add_root(node);
                return Ok(());
            }
        };
        if self.is_ancestor(&node, &parent) {
            return Err(Error::CycleDetected);
        }
        self.graft(node, parent, weight);
        Ok(())
    }

    /// 把节点设为根（断开原来的父边），返回森林是否改变
    pub fn add_root(&mut self, node: N) -> bool {
        if self.roots.contains(&node) {
            return false;
        }
        self.detach(&node);
        self.graph.add(node.clone());
        self.roots.insert(node);
        true
    }

    /// 嫁接整棵树：`attach` 为 `None` 时作为新树，否则挂到给定父节点下
    ///
    /// 挂接点及其祖先都不能属于被嫁接的树，检查在修改之前完成。
    pub fn add_tree(&mut self, tree: &Tree<N, W>, attach: Option<(N, W)>) -> Result<()> {
        let Some(root) = tree.root() else {
            return Ok(());
        };
        if let Some((parent, _)) = &attach {
            let mut current = Some(parent);
            while let Some(node) = current {
                if tree.contains(node) {
                    return Err(Error::CycleDetected);
                }
                current = self.parents.get(node);
            }
        }

        match attach {
            Some((parent, weight)) => self.graft(root.clone(), parent, weight),
            None => {
                self.add_root(root.clone());
            }
        }
        for node in tree.as_forest().descendants(root).into_iter().skip(1) {
            if let Some(parent) = tree.parent(&node) {
                if let Some(weight) = tree.edge(parent, &node) {
                    self.graft(node.clone(), parent.clone(), weight.clone());
                }
            }
        }
        Ok(())
    }

    /// 重命名节点，保留父边与子边；`now` 已存在时不做修改
    pub fn set(&mut self, old: &N, now: N) -> bool {
        if old == &now || !self.graph.contains(old) || self.graph.contains(&now) {
            return false;
        }
        self.graph.set(old, now.clone());
        if let Some(parent) = self.parents.remove(old) {
            self.parents.insert(now.clone(), parent);
        }
        let children: Vec<N> = self.children(&now).cloned().collect();
        for child in children {
            self.parents.insert(child, now.clone());
        }
        if self.roots.shift_remove(old) {
            self.roots.insert(now);
        }
        true
    }

    /// 删除节点及其整个子树，返回节点之前是否存在
    pub fn disconnect(&mut self, node: &N) -> bool {
        if !self.graph.contains(node) {
            return false;
        }
        // 先序的逆序保证子节点总在父节点之前被删除
        for n in self.descendants(node).iter().rev() {
            self.graph.remove(n);
            self.parents.remove(n);
            self.roots.shift_remove(n);
        }
        true
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.roots.clear();
        self.parents.clear();
    }

    // ==================== 查询 ====================

    pub fn roots(&self) -> indexmap::set::Iter<'_, N> {
        self.roots.iter()
    }

    pub fn is_root(&self, node: &N) -> bool {
        self.roots.contains(node)
    }

    /// 父节点；根节点与不存在的节点返回 `None`
    pub fn parent(&self, node: &N) -> Option<&N> {
        self.parents.get(node)
    }

    /// 子节点（按挂接顺序）
    pub fn children<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.graph
            .adjacency(node)
            .into_iter()
            .flat_map(|adj| adj.keys())
    }

    /// 以先序列出 `node` 及其所有后代
    pub fn descendants(&self, node: &N) -> Vec<N> {
        let mut order = Vec::new();
        if !self.graph.contains(node) {
            return order;
        }
        let mut stack = vec![node.clone()];
        while let Some(current) = stack.pop() {
            let mut children: Vec<N> = self.children(&current).cloned().collect();
            children.reverse();
            stack.extend(children);
            order.push(current);
        }
        order
    }

    /// 拆分为互相独立的树
    pub fn trees(&self) -> Vec<Tree<N, W>> {
        self.roots
            .iter()
            .map(|root| {
                let mut forest = Forest::new();
                forest.add_root(root.clone());
                for node in self.descendants(root).into_iter().skip(1) {
                    if let Some(parent) = self.parents.get(&node) {
                        if let Some(weight) = self.graph.edge(parent, &node) {
                            forest.graft(node.clone(), parent.clone(), weight.clone());
                        }
                    }
                }
                Tree::from_forest(forest)
            })
            .collect()
    }

    /// 树的数量，等于节点数减边数
    pub fn component_count(&self) -> usize {
        self.graph.size() - self.graph.edge_count()
    }

    /// 底层有向图
    pub fn as_graph(&self) -> &HashGraph<N, W> {
        &self.graph
    }

    // ==================== 内部 ====================

    /// 不做环检查的挂接，调用方保证 `parent` 不是 `node` 的后代
    pub(crate) fn graft(&mut self, node: N, parent: N, weight: W) {
        if !self.graph.contains(&parent) {
            self.graph.add(parent.clone());
            self.roots.insert(parent.clone());
        }
        self.detach(&node);
        self.graph.connect(parent.clone(), node.clone(), weight);
        self.parents.insert(node, parent);
    }

    fn detach(&mut self, node: &N) {
        if let Some(old) = self.parents.remove(node) {
            self.graph.disconnect(&old, node);
        }
        self.roots.shift_remove(node);
    }

    /// `ancestor` 是否为 `node` 自身或其祖先
    fn is_ancestor(&self, ancestor: &N, node: &N) -> bool {
        let mut current = node;
        loop {
            if current == ancestor {
                return true;
            }
            match self.parents.get(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}

impl<N: Clone + Eq + Hash, W> ReadableGraph for Forest<N, W> {
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
        self.parents.len()
    }

    fn is_directed(&self) -> bool {
        true
    }
}
