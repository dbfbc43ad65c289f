//! 带距离的路径
//!
//! 在 [`Path`] 之上维护所有边长度之和。每次修改只按增减的那条边调整，
//! 从不整体重算。

use super::path::Path;
use super::traits::ReadableGraph;
use crate::error::Result;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;

/// 带距离的路径，`F` 把边权重投影为长度
#[derive(Clone)]
pub struct DistancePath<N, W, F> {
    path: Path<N, W>,
    distance: f64,
    length: F,
}

impl<N, W, F> DistancePath<N, W, F>
where
    N: Clone + Eq + Hash,
    F: Fn(&W) -> f64,
{
    /// 创建只有起点的路径，距离为 0
    pub fn new(first: N, length: F) -> Self {
        Self {
            path: Path::new(first),
            distance: 0.0,
            length,
        }
    }

    /// 从已有路径构建，距离为各边长度之和
    pub fn from_path(path: Path<N, W>, length: F) -> Self {
        let distance = path.weights().iter().map(&length).sum();
        Self {
            path,
            distance,
            length,
        }
    }

    /// 当前距离
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn path(&self) -> &Path<N, W> {
        &self.path
    }

    pub fn into_path(self) -> Path<N, W> {
        self.path
    }

    pub fn append(&mut self, node: N, weight: W) -> bool {
        let delta = (self.length)(&weight);
        let added = self.path.append(node, weight);
        if added {
            self.distance += delta;
        }
        added
    }

    pub fn insert_before(&mut self, index: usize, node: N, weight: W) -> Result<bool> {
        let delta = (self.length)(&weight);
        let added = self.path.insert_before(index, node, weight)?;
        if added {
            self.distance += delta;
        }
        Ok(added)
    }

    pub fn insert_after(&mut self, index: usize, node: N, weight: W) -> Result<bool> {
        let delta = (self.length)(&weight);
        let added = self.path.insert_after(index, node, weight)?;
        if added {
            self.distance += delta;
        }
        Ok(added)
    }

    pub fn insert_before_node(&mut self, anchor: &N, node: N, weight: W) -> bool {
        match self.path.index_of(anchor) {
            Some(index) => self.insert_before(index, node, weight).unwrap_or(false),
            None => false,
        }
    }

    pub fn insert_after_node(&mut self, anchor: &N, node: N, weight: W) -> bool {
        match self.path.index_of(anchor) {
            Some(index) => self.insert_after(index, node, weight).unwrap_or(false),
            None => false,
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<N> {
        let (node, edge) = self.path.remove_entry(index)?;
        self.distance -= (self.length)(&edge);
        Ok(node)
    }

    pub fn remove_node(&mut self, node: &N) -> Result<bool> {
        match self.path.index_of(node) {
            Some(index) => self.remove(index).map(|_| true),
            None => Ok(false),
        }
    }

    /// 替换节点不影响距离
    pub fn set(&mut self, index: usize, node: N) -> Result<bool> {
        self.path.set(index, node)
    }

    pub fn replace(&mut self, old: &N, now: N) -> bool {
        self.path.replace(old, now)
    }

    pub fn set_edge_before(&mut self, index: usize, weight: W) -> Result<W> {
        let added = (self.length)(&weight);
        let old = self.path.set_edge_before(index, weight)?;
        self.distance += added - (self.length)(&old);
        Ok(old)
    }

    pub fn set_edge_after(&mut self, index: usize, weight: W) -> Result<W> {
        let added = (self.length)(&weight);
        let old = self.path.set_edge_after(index, weight)?;
        self.distance += added - (self.length)(&old);
        Ok(old)
    }

    /// 清空到只剩起点，距离归零
    pub fn clear(&mut self) {
        self.path.clear();
        self.distance = 0.0;
    }
}

impl<N, W, F> Deref for DistancePath<N, W, F> {
    type Target = Path<N, W>;

    fn deref(&self) -> &Path<N, W> {
        &self.path
    }
}

impl<N: Clone + Eq + Hash, W, F> ReadableGraph for DistancePath<N, W, F> {
    type Node = N;
    type Weight = W;
    type Nodes<'a> = <Path<N, W> as ReadableGraph>::Nodes<'a> where Self: 'a;
    type Adj<'a> = <Path<N, W> as ReadableGraph>::Adj<'a> where Self: 'a;

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

impl<N: fmt::Debug, W: fmt::Debug, F> fmt::Debug for DistancePath<N, W, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistancePath")
            .field("path", &self.path)
            .field("distance", &self.distance)
            .finish()
    }
}

impl<N: fmt::Display + Eq + Hash, W: fmt::Display, F> fmt::Display for DistancePath<N, W, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (distance {})", self.path, self.distance)
    }
}
