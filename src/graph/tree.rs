//! 有根树：至多一个根的 [`Forest`]

use super::forest::Forest;
use super::traits::ReadableGraph;
use crate::error::{Error, Result};
use std::hash::Hash;

/// 有根树
#[derive(Debug, Clone)]
pub struct Tree<N, W> {
    forest: Forest<N, W>,
}

impl<N, W> Tree<N, W> {
    /// 创建空树
    pub fn empty() -> Self {
        Self {
            forest: Forest::new(),
        }
    }
}

impl<N, W> Default for Tree<N, W> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<N: Clone + Eq + Hash, W: Clone> Tree<N, W> {
    /// 创建只有根节点的树
    pub fn with_root(root: N) -> Self {
        let mut forest = Forest::new();
        forest.add_root(root);
        Self { forest }
    }

    pub(crate) fn from_forest(forest: Forest<N, W>) -> Self {
        Self { forest }
    }

    pub fn root(&self) -> Option<&N> {
        self.forest.roots().next()
    }

    /// 挂接节点，语义同 [`Forest::add`]，但树已有根时不能再产生第二个根
    pub fn add(&mut self, node: N, parent: Option<N>, weight: W) -> Result<()> {
        let second_root = match &parent {
            Some(p) if p != &node => !self.forest.contains(p) && self.root().is_some(),
            _ => self.root().is_some_and(|root| root != &node),
        };
        if second_root {
            return Err(Error::RootAlreadyExists);
        }
        self.forest.add(node, parent, weight)
    }

    /// 挂到已在树中的父节点下，不做检查
    pub(crate) fn graft(&mut self, node: N, parent: N, weight: W) {
        self.forest.graft(node, parent, weight);
    }

    /// 删除节点及其子树；删除根会清空整棵树
    pub fn disconnect(&mut self, node: &N) -> bool {
        if self.root() == Some(node) {
            self.forest.clear();
            return true;
        }
        self.forest.disconnect(node)
    }

    pub fn set(&mut self, old: &N, now: N) -> bool {
        self.forest.set(old, now)
    }

    pub fn parent(&self, node: &N) -> Option<&N> {
        self.forest.parent(node)
    }

    pub fn children<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.forest.children(node)
    }

    pub fn clear(&mut self) {
        self.forest.clear();
    }

    pub fn as_forest(&self) -> &Forest<N, W> {
        &self.forest
    }

    pub fn into_forest(self) -> Forest<N, W> {
        self.forest
    }
}

impl<N: Clone + Eq + Hash, W> ReadableGraph for Tree<N, W> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = <Forest<N, W> as ReadableGraph>::Nodes<'a> where Self: 'a;
    type Adj<'a> = <Forest<N, W> as ReadableGraph>::Adj<'a> where Self: 'a;

    fn nodes(&self) -> Self::Nodes<'_> {
        self.forest.nodes()
    }

    fn adj(&self, node: &N) -> Option<Self::Adj<'_>> {
        self.forest.adj(node)
    }

    fn edge(&self, a: &N, b: &N) -> Option<&W> {
        self.forest.edge(a, b)
    }

    fn contains(&self, node: &N) -> bool {
        self.forest.contains(node)
    }

    fn size(&self) -> usize {
        self.forest.size()
    }

    fn edge_count(&self) -> usize {
        self.forest.edge_count()
    }

    fn is_directed(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_root() {
        let mut tree = Tree::with_root(1);
        tree.add(2, Some(1), "a").unwrap();
        tree.add(3, Some(2), "b").unwrap();
        assert_eq!(tree.root(), Some(&1));

        let err = tree.add(4, None, "c").unwrap_err();
        assert!(matches!(err, Error::RootAlreadyExists));
        // 父节点不在树中同样会产生第二个根
        assert!(tree.add(5, Some(6), "d").is_err());
        assert_eq!(tree.size(), 3);
        // 重复设置当前根不是错误
        tree.add(1, None, "e").unwrap();
    }

    #[test]
    fn test_first_add_creates_root() {
        let mut tree: Tree<&str, ()> = Tree::empty();
        assert_eq!(tree.root(), None);
        tree.add("b", Some("a"), ()).unwrap();
        assert_eq!(tree.root(), Some(&"a"));
        assert_eq!(tree.parent(&"b"), Some(&"a"));
    }

    #[test]
    fn test_disconnect_root_clears() {
        let mut tree = Tree::with_root("r");
        tree.add("a", Some("r"), 1).unwrap();
        tree.add("b", Some("a"), 2).unwrap();
        assert!(tree.disconnect(&"b"));
        assert_eq!(tree.size(), 2);
        assert!(tree.disconnect(&"r"));
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_reparent_within_tree() {
        let mut tree = Tree::with_root("r");
        tree.add("a", Some("r"), 1).unwrap();
        tree.add("b", Some("r"), 2).unwrap();
        tree.add("b", Some("a"), 3).unwrap();
        assert_eq!(tree.parent(&"b"), Some(&"a"));
        assert_eq!(tree.edge_count(), 2);
        let children: Vec<_> = tree.children(&"r").copied().collect();
        assert_eq!(children, vec!["a"]);
    }
}
