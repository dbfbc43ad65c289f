//! 边列表导入
//!
//! 从 CSV（表头 `from,to,weight`）或 JSON Lines 读取边列表，构建
//! `HashGraph<String, f64>`。只读入，不回写。

use crate::error::{Error, Result};
use crate::graph::{Graph, HashGraph, ReadableGraph};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

/// 导入统计
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportStats {
    pub nodes_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// 一条边记录；缺少权重时为 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: String,
    pub to: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl EdgeRecord {
    fn validate(&self) -> Result<()> {
        if self.from.is_empty() || self.to.is_empty() {
            return Err(Error::Import("节点名不能为空".to_string()));
        }
        if self.weight.is_nan() {
            return Err(Error::Import(format!(
                "边 {} -> {} 的权重不是数字",
                self.from, self.to
            )));
        }
        Ok(())
    }
}

/// 输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Csv,
    JsonLines,
}

impl Format {
    /// 按扩展名推断，`.jsonl` / `.json` 为 JSON Lines，其余为 CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("json") => Format::JsonLines,
            _ => Format::Csv,
        }
    }
}

/// 边列表导入器
#[derive(Debug, Clone)]
pub struct EdgeListImporter {
    directed: bool,
    skip_invalid: bool,
}

impl Default for EdgeListImporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EdgeListImporter {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            skip_invalid: false,
        }
    }

    /// 跳过无法解析的记录并计入 `errors`，而不是整体失败
    pub fn skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// 按扩展名选择格式导入文件
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<(HashGraph<String, f64>, ImportStats)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::info!(path = %path.display(), "importing edge list");
        match Format::from_path(path) {
            Format::Csv => self.read_csv(file),
            Format::JsonLines => self.read_jsonl(BufReader::new(file)),
        }
    }

    /// 读取带表头的 CSV
    pub fn read_csv<R: Read>(&self, reader: R) -> Result<(HashGraph<String, f64>, ImportStats)> {
        let start = Instant::now();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut graph = HashGraph::with_directed(self.directed);
        let mut stats = ImportStats::default();
        for (line, record) in csv_reader.deserialize::<EdgeRecord>().enumerate() {
            let record = record.map_err(Error::from).and_then(|r| r.validate().map(|_| r));
            self.accept(&mut graph, &mut stats, line + 2, record)?;
        }
        Ok(self.finish(graph, stats, start))
    }

    /// 读取 JSON Lines，空行忽略
    pub fn read_jsonl<R: BufRead>(&self, reader: R) -> Result<(HashGraph<String, f64>, ImportStats)> {
        let start = Instant::now();
        let mut graph = HashGraph::with_directed(self.directed);
        let mut stats = ImportStats::default();
        for (line, text) in reader.lines().enumerate() {
            let text = text?;
            if text.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str::<EdgeRecord>(&text)
                .map_err(|e| Error::Import(format!("JSON 解析错误: {}", e)))
                .and_then(|r| r.validate().map(|_| r));
            self.accept(&mut graph, &mut stats, line + 1, record)?;
        }
        Ok(self.finish(graph, stats, start))
    }

    fn accept(
        &self,
        graph: &mut HashGraph<String, f64>,
        stats: &mut ImportStats,
        line: usize,
        record: Result<EdgeRecord>,
    ) -> Result<()> {
        match record {
            Ok(record) => {
                graph.connect(record.from, record.to, record.weight);
                stats.edges_imported += 1;
                Ok(())
            }
            Err(err) if self.skip_invalid => {
                tracing::warn!(line, error = %err, "skipping invalid record");
                stats.errors += 1;
                Ok(())
            }
            Err(err) => Err(Error::Import(format!("第 {} 行: {}", line, err))),
        }
    }

    fn finish(
        &self,
        graph: HashGraph<String, f64>,
        mut stats: ImportStats,
        start: Instant,
    ) -> (HashGraph<String, f64>, ImportStats) {
        stats.nodes_imported = graph.size();
        stats.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            nodes = stats.nodes_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "edge list imported"
        );
        (graph, stats)
    }
}

/// 按扩展名导入有向或无向边列表
pub fn import_edge_list<P: AsRef<Path>>(path: P, directed: bool) -> Result<HashGraph<String, f64>> {
    EdgeListImporter::new(directed).import_file(path).map(|(graph, _)| graph)
}
