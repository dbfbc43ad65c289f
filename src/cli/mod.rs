//! 命令行输出
//!
//! 表格打印与图统计，供 `graphkit` 二进制使用

mod printer;

pub use printer::{format_number, PrintMode, Printer};

use crate::graph::ReadableGraph;
use crate::traversal::component_count;
use serde::Serialize;

/// 图统计信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub directed: bool,
    pub nodes: usize,
    /// 无向图中每条边只计一次
    pub edges: usize,
    pub components: usize,
    pub total_weight: f64,
}

impl GraphStats {
    pub fn of<G>(graph: &G) -> Self
    where
        G: ReadableGraph<Weight = f64> + ?Sized,
    {
        let directed = graph.is_directed();
        let mut total_weight: f64 = graph.weights().into_iter().sum();
        let mut edges = graph.edge_count();
        if !directed {
            // 自环只存一份
            let loops = graph.nodes().filter(|n| graph.connected(n, n)).count();
            let loop_weight: f64 = graph.nodes().filter_map(|n| graph.edge(n, n)).sum();
            edges = (edges - loops) / 2 + loops;
            total_weight = (total_weight - loop_weight) / 2.0 + loop_weight;
        }
        Self {
            directed,
            nodes: graph.size(),
            edges,
            components: component_count(graph),
            total_weight,
        }
    }
}
