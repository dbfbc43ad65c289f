//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use super::GraphStats;
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintMode {
    /// 表格模式
    #[default]
    Table,
    /// 垂直模式，每行按 `列: 值` 展开
    Vertical,
}

/// 结果打印器
#[derive(Debug, Default)]
pub struct Printer {
    mode: PrintMode,
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 打印结果集
    pub fn print_result(&self, columns: &[&str], rows: &[Vec<String>], elapsed_ms: u128) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("{} ({} ms)\n", "Empty set".yellow(), elapsed_ms);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}{} row(s) ({} ms)\n", output, rows.len(), elapsed_ms)
    }

    fn format_table(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(Row::new(columns.iter().map(|c| Cell::new(c)).collect()));
        for values in rows {
            table.add_row(Row::new(values.iter().map(|v| Cell::new(v)).collect()));
        }
        table.to_string()
    }

    fn format_vertical(&self, columns: &[&str], rows: &[Vec<String>]) -> String {
        let width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, values) in rows.iter().enumerate() {
            output.push_str(&format!("*************************** {}. row ***************************\n", i + 1));
            for (j, column) in columns.iter().enumerate() {
                let value = values.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", column, value, width = width));
            }
        }
        output
    }

    /// 图统计信息
    pub fn print_stats(&self, stats: &GraphStats) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Directed", stats.directed.to_string()]);
        table.add_row(row!["Node Count", stats.nodes.to_string()]);
        table.add_row(row!["Edge Count", stats.edges.to_string()]);
        table.add_row(row!["Components", stats.components.to_string()]);
        table.add_row(row!["Total Weight", format_number(stats.total_weight)]);
        table.to_string()
    }

    /// 标题行
    pub fn heading(title: &str) -> String {
        format!("{}\n", title.bold().green())
    }

    pub fn error(message: &str) -> String {
        format!("{} {}\n", "错误:".red().bold(), message)
    }
}

/// 整数值不带小数部分，无穷大显示为 ∞
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        if value > 0.0 { "∞".to_string() } else { "-∞".to_string() }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
    }
}
