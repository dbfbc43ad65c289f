//! 边定义
//!
//! 边的身份由端点 (a, b) 决定，权重只是附带的值

use std::fmt;

/// 有向边 a -> b 及其权重
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<N, W> {
    /// 起点
    pub a: N,
    /// 终点
    pub b: N,
    /// 权重
    pub weight: W,
}

impl<N, W> Edge<N, W> {
    /// 创建新边
    pub fn new(a: N, b: N, weight: W) -> Self {
        Self { a, b, weight }
    }

    /// 反向边（权重不变）
    pub fn reversed(self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            weight: self.weight,
        }
    }
}

impl<N: Clone, W: Clone> Edge<&N, &W> {
    /// 从借用的边克隆出独立的边
    pub fn cloned(&self) -> Edge<N, W> {
        Edge {
            a: self.a.clone(),
            b: self.b.clone(),
            weight: self.weight.clone(),
        }
    }
}

/// 带权重的箭头 `----w--->`，路径的显示也复用它
pub(crate) fn arrow<W: fmt::Display>(weight: &W) -> String {
    let weight = weight.to_string();
    // 负权重前补空格，避免和箭头连在一起
    let pad = if weight.starts_with('-') { " " } else { "" };
    format!("----{}{}--->", pad, weight)
}

impl<N: fmt::Display, W: fmt::Display> fmt::Display for Edge<N, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.a, arrow(&self.weight), self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_display() {
        assert_eq!(Edge::new("a", "b", 3).to_string(), "a ----3---> b");
        assert_eq!(Edge::new(1, 2, -4).to_string(), "1 ---- -4---> 2");
    }

    #[test]
    fn test_edge_reversed_and_cloned() {
        let a = String::from("a");
        let b = String::from("b");
        let w = 7u32;
        let borrowed = Edge::new(&a, &b, &w);
        let owned = borrowed.cloned();
        assert_eq!(owned, Edge::new(a.clone(), b.clone(), 7));
        assert_eq!(owned.reversed(), Edge::new(b, a, 7));
    }
}
