//! 遍历引擎
//!
//! 广度优先与深度优先只在待访问队列的取出方式上不同（队首 / 队尾）。
//! 节点在出队时标记为已访问，每个节点最多产出一次。
//! 遍历是惰性的单次序列，遍历期间不能修改图。

mod components;

pub use components::{component, component_count, components, spanning_tree, topological_distance};

use crate::graph::{ReadableGraph, Tree};
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// 待访问队列的取出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// 先进先出
    #[default]
    BreadthFirst,
    /// 后进先出
    DepthFirst,
}

/// 图遍历迭代器
pub struct Traversal<'g, G>
where
    G: ReadableGraph + ?Sized + 'g,
{
    graph: &'g G,
    order: TraversalOrder,
    frontier: VecDeque<G::Node>,
    visited: HashSet<G::Node>,
    /// 整图遍历时用于寻找下一个未访问的起点
    restart: Option<G::Nodes<'g>>,
}

impl<'g, G> Traversal<'g, G>
where
    G: ReadableGraph + ?Sized + 'g,
{
    /// 从单个源点出发；源点不在图中时序列为空
    pub fn from_source(graph: &'g G, source: &G::Node, order: TraversalOrder) -> Self {
        let mut frontier = VecDeque::new();
        if graph.contains(source) {
            frontier.push_back(source.clone());
        }
        Self {
            graph,
            order,
            frontier,
            visited: HashSet::new(),
            restart: None,
        }
    }

    /// 覆盖整张图：一个起点的可达节点耗尽后，从下一个未访问的节点继续
    pub fn whole(graph: &'g G, order: TraversalOrder) -> Self {
        Self {
            graph,
            order,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            restart: Some(graph.nodes()),
        }
    }

    /// 已产出的节点
    pub fn visited(&self) -> &HashSet<G::Node> {
        &self.visited
    }
}

impl<'g, G> Iterator for Traversal<'g, G>
where
    G: ReadableGraph + ?Sized + 'g,
{
    type Item = G::Node;

    fn next(&mut self) -> Option<G::Node> {
        loop {
            let next = match self.order {
                TraversalOrder::BreadthFirst => self.frontier.pop_front(),
                TraversalOrder::DepthFirst => self.frontier.pop_back(),
            };
            let Some(node) = next else {
                let restart = self.restart.as_mut()?;
                let start = restart.find(|n| !self.visited.contains(*n))?;
                self.frontier.push_back(start.clone());
                continue;
            };
            if self.visited.contains(&node) {
                continue;
            }
            if let Some(adj) = self.graph.adj(&node) {
                for (neighbor, _) in adj {
                    if !self.visited.contains(neighbor) {
                        self.frontier.push_back(neighbor.clone());
                    }
                }
            }
            self.visited.insert(node.clone());
            return Some(node);
        }
    }
}

/// 从源点广度优先遍历
pub fn breadth_first<'g, G>(graph: &'g G, source: &G::Node) -> Traversal<'g, G>
where
    G: ReadableGraph + ?Sized,
{
    Traversal::from_source(graph, source, TraversalOrder::BreadthFirst)
}

/// 从源点深度优先遍历
pub fn depth_first<'g, G>(graph: &'g G, source: &G::Node) -> Traversal<'g, G>
where
    G: ReadableGraph + ?Sized,
{
    Traversal::from_source(graph, source, TraversalOrder::DepthFirst)
}

/// 广度优先遍历整张图
pub fn breadth_first_all<G>(graph: &G) -> Traversal<'_, G>
where
    G: ReadableGraph + ?Sized,
{
    Traversal::whole(graph, TraversalOrder::BreadthFirst)
}

/// 深度优先遍历整张图
pub fn depth_first_all<G>(graph: &G) -> Traversal<'_, G>
where
    G: ReadableGraph + ?Sized,
{
    Traversal::whole(graph, TraversalOrder::DepthFirst)
}

/// 树的先序遍历（父节点先于子节点）
pub fn preorder<N, W>(tree: &Tree<N, W>) -> impl Iterator<Item = N> + '_
where
    N: Clone + Eq + Hash,
    W: Clone,
{
    tree.root()
        .map(|root| depth_first(tree, root))
        .into_iter()
        .flatten()
}

/// 树的后序遍历（子节点先于父节点）
pub fn postorder<N, W>(tree: &Tree<N, W>) -> PostOrder<'_, N, W>
where
    N: Clone + Eq + Hash,
    W: Clone,
{
    let stack = tree
        .root()
        .map(|root| vec![(root.clone(), children_of(tree, root))])
        .unwrap_or_default();
    PostOrder { tree, stack }
}

fn children_of<N, W>(tree: &Tree<N, W>, node: &N) -> std::vec::IntoIter<N>
where
    N: Clone + Eq + Hash,
    W: Clone,
{
    tree.children(node).cloned().collect::<Vec<_>>().into_iter()
}

/// 树的后序遍历迭代器
pub struct PostOrder<'t, N, W> {
    tree: &'t Tree<N, W>,
    stack: Vec<(N, std::vec::IntoIter<N>)>,
}

impl<'t, N, W> Iterator for PostOrder<'t, N, W>
where
    N: Clone + Eq + Hash,
    W: Clone,
{
    type Item = N;

    fn next(&mut self) -> Option<N> {
        loop {
            let (_, children) = self.stack.last_mut()?;
            match children.next() {
                Some(child) => {
                    let grandchildren = children_of(self.tree, &child);
                    self.stack.push((child, grandchildren));
                }
                None => return self.stack.pop().map(|(node, _)| node),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Graph, HashGraph};

    fn diamond() -> HashGraph<u32, ()> {
        // 1 -> 2 -> 4, 1 -> 3 -> 4, 4 -> 5; 6 -> 7 独立
        HashGraph::from_edges(
            true,
            [(1, 2, ()), (1, 3, ()), (2, 4, ()), (3, 4, ()), (4, 5, ()), (6, 7, ())],
        )
    }

    #[test]
    fn test_breadth_first_levels() {
        let g = diamond();
        let order: Vec<u32> = breadth_first(&g, &1).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_depth_first_goes_deep() {
        let g = diamond();
        let order: Vec<u32> = depth_first(&g, &1).collect();
        // 后进先出：先走最后加入的邻居 3
        assert_eq!(order, vec![1, 3, 4, 5, 2]);
    }

    #[test]
    fn test_absent_source_is_empty() {
        let g = diamond();
        assert_eq!(breadth_first(&g, &99).count(), 0);
    }

    #[test]
    fn test_whole_graph_visits_each_node_once() {
        let g = diamond();
        for order in [TraversalOrder::BreadthFirst, TraversalOrder::DepthFirst] {
            let mut seen: Vec<u32> = Traversal::whole(&g, order).collect();
            assert_eq!(seen.len(), 7);
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), 7);
        }
        let order: Vec<u32> = breadth_first_all(&g).collect();
        assert_eq!(&order[5..], &[6, 7]);
    }

    #[test]
    fn test_undirected_cycle_terminates() {
        let mut g = HashGraph::undirected();
        g.connect('a', 'b', 1);
        g.connect('b', 'c', 1);
        g.connect('c', 'a', 1);
        assert_eq!(depth_first_all(&g).count(), 3);
    }

    #[test]
    fn test_tree_orders() {
        //     r
        //    / \
        //   a   b
        //  / \
        // c   d
        let mut tree = Tree::with_root('r');
        tree.add('a', Some('r'), ()).unwrap();
        tree.add('b', Some('r'), ()).unwrap();
        tree.add('c', Some('a'), ()).unwrap();
        tree.add('d', Some('a'), ()).unwrap();

        let pre: Vec<char> = preorder(&tree).collect();
        assert_eq!(pre[0], 'r');
        let position = |n: char| pre.iter().position(|&m| m == n);
        assert!(position('a') < position('c'));
        assert!(position('a') < position('d'));

        let post: Vec<char> = postorder(&tree).collect();
        assert_eq!(post, vec!['c', 'd', 'a', 'b', 'r']);

        let empty: Tree<char, ()> = Tree::empty();
        assert_eq!(preorder(&empty).count(), 0);
        assert_eq!(postorder(&empty).count(), 0);
    }
}
