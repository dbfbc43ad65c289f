//! 并查集
//!
//! 元素存放在下标数组中，父指针是下标而不是引用；
//! 查找时做路径压缩，合并时按秩合并，单次操作近似常数时间。

use std::collections::HashMap;
use std::hash::Hash;

/// 以任意可哈希值为元素的并查集
#[derive(Debug, Clone)]
pub struct DisjointSet<T> {
    ids: HashMap<T, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// 当前集合数
    sets: usize,
}

impl<T: Clone + Eq + Hash> DisjointSet<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: HashMap::with_capacity(capacity),
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            sets: 0,
        }
    }

    /// 为元素建立单元素集合，返回它的下标；已存在时返回原下标
    pub fn make_set(&mut self, element: T) -> usize {
        if let Some(&id) = self.ids.get(&element) {
            return id;
        }
        let id = self.parent.len();
        self.ids.insert(element, id);
        self.parent.push(id);
        self.rank.push(0);
        self.sets += 1;
        id
    }

    /// 元素所在集合的代表下标
    pub fn find(&mut self, element: &T) -> Option<usize> {
        let id = *self.ids.get(element)?;
        Some(self.find_root(id))
    }

    /// 合并两个元素所在的集合，返回之前是否属于不同集合
    ///
    /// 未知元素会先建立单元素集合。
    pub fn union(&mut self, a: &T, b: &T) -> bool {
        let a = self.make_set(a.clone());
        let b = self.make_set(b.clone());
        let (root_a, root_b) = (self.find_root(a), self.find_root(b));
        if root_a == root_b {
            return false;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// 两个元素是否属于同一集合；任一未知时返回 false
    pub fn same_set(&mut self, a: &T, b: &T) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn set_count(&self) -> usize {
        self.sets
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn find_root(&mut self, id: usize) -> usize {
        let mut root = id;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // 路径压缩
        let mut current = id;
        while current != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }
}

impl<T: Clone + Eq + Hash> Default for DisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}
