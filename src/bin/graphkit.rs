//! graphkit 命令行工具
//!
//! 从边列表文件读取图并运行算法，或在随机网格上比较最大流算法

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use graphkit::algorithm::{self, AnyPathAlgorithm, MaxFlowAlgorithm, MstAlgorithm};
use graphkit::cli::{format_number, GraphStats, PrintMode, Printer};
use graphkit::generators::grid2d;
use graphkit::graph::{Graph, HashGraph, ReadableGraph};
use graphkit::import::EdgeListImporter;
use graphkit::traversal::preorder;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "graphkit", version)]
#[command(about = "graphkit 图算法命令行工具")]
struct Cli {
    /// 日志详细程度（-v 为 debug，-vv 为 trace；RUST_LOG 优先）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 以 JSON 输出结果
    #[arg(long, global = true)]
    json: bool,

    /// 表格按行竖排输出，适合列较多的结果
    #[arg(long, global = true)]
    vertical: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Input {
    /// 边列表文件：CSV（表头 from,to,weight），扩展名 .jsonl 时按 JSON Lines 读取
    #[arg(short, long)]
    input: PathBuf,

    /// 按无向图读取
    #[arg(short, long)]
    undirected: bool,

    /// 跳过无法解析的记录
    #[arg(long)]
    skip_invalid: bool,
}

impl Input {
    fn load(&self) -> Result<HashGraph<String, f64>> {
        let (graph, stats) = EdgeListImporter::new(!self.undirected)
            .skip_invalid(self.skip_invalid)
            .import_file(&self.input)
            .with_context(|| format!("无法读取边列表 {}", self.input.display()))?;
        tracing::debug!(?stats, "graph loaded");
        Ok(graph)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 随机容量网格上比较 Edmonds-Karp 与 Dinic
    GridFlow {
        /// 网格宽度
        #[arg(long, default_value_t = 200)]
        width: usize,

        /// 网格高度
        #[arg(long, default_value_t = 50)]
        height: usize,

        /// 随机种子，不指定时随机选取
        #[arg(long)]
        seed: Option<u64>,

        /// 容量上限（不含）
        #[arg(long, default_value_t = 1000)]
        max_capacity: u32,
    },

    /// 两点之间的路径
    Path {
        #[command(flatten)]
        input: Input,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(short, long, value_enum, default_value_t = PathMode::AStar)]
        algorithm: PathMode,
    },

    /// 最小生成树
    Mst {
        #[command(flatten)]
        input: Input,

        #[arg(short, long, value_enum, default_value_t = MstMode::Prim)]
        algorithm: MstMode,
    },

    /// 最大流与最小割
    Flow {
        #[command(flatten)]
        input: Input,

        #[arg(long)]
        source: String,

        #[arg(long)]
        drain: String,

        #[arg(short, long, value_enum, default_value_t = FlowMode::Dinic)]
        algorithm: FlowMode,
    },

    /// 图统计信息
    Stats {
        #[command(flatten)]
        input: Input,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PathMode {
    /// 按权重最短（A*，无启发）
    AStar,
    /// 跳数最少
    Bfs,
    /// 深度优先找到的任意路径
    Dfs,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum MstMode {
    Prim,
    Kruskal,
}

impl From<MstMode> for MstAlgorithm {
    fn from(mode: MstMode) -> Self {
        match mode {
            MstMode::Prim => MstAlgorithm::Prim,
            MstMode::Kruskal => MstAlgorithm::Kruskal,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum FlowMode {
    Dinic,
    EdmondsKarp,
}

impl From<FlowMode> for MaxFlowAlgorithm {
    fn from(mode: FlowMode) -> Self {
        match mode {
            FlowMode::Dinic => MaxFlowAlgorithm::Dinic,
            FlowMode::EdmondsKarp => MaxFlowAlgorithm::EdmondsKarp,
        }
    }
}

// ==================== 输出结构 ====================

#[derive(Serialize)]
struct FlowRun {
    algorithm: MaxFlowAlgorithm,
    value: f64,
    elapsed_ms: u128,
}

#[derive(Serialize)]
struct GridFlowReport {
    width: usize,
    height: usize,
    seed: u64,
    source: (usize, usize),
    drain: (usize, usize),
    runs: Vec<FlowRun>,
}

#[derive(Serialize)]
struct PathReport {
    from: String,
    to: String,
    found: bool,
    nodes: Vec<String>,
    weights: Vec<f64>,
    distance: Option<f64>,
}

#[derive(Serialize)]
struct TreeEdge {
    parent: String,
    child: String,
    weight: f64,
}

#[derive(Serialize)]
struct MstReport {
    algorithm: MstAlgorithm,
    root: Option<String>,
    covered: usize,
    nodes: usize,
    total_weight: f64,
    edges: Vec<TreeEdge>,
}

#[derive(Serialize)]
struct FlowEdge {
    from: String,
    to: String,
    flow: f64,
}

#[derive(Serialize)]
struct FlowReport {
    source: String,
    drain: String,
    algorithm: MaxFlowAlgorithm,
    value: f64,
    elapsed_ms: u128,
    edges: Vec<FlowEdge>,
    source_side: Vec<String>,
}

/// `-v` 次数对应的默认日志级别
fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let result = run(cli);
    if let Err(err) = &result {
        if !json {
            eprint!("{}", Printer::error(&format!("{:#}", err)));
            std::process::exit(1);
        }
    }
    result
}

fn run(cli: Cli) -> Result<()> {
    let mode = if cli.vertical { PrintMode::Vertical } else { PrintMode::Table };
    let printer = Printer::new(mode);
    match cli.command {
        Command::GridFlow {
            width,
            height,
            seed,
            max_capacity,
        } => grid_flow(&printer, cli.json, width, height, seed, max_capacity),
        Command::Path {
            input,
            from,
            to,
            algorithm,
        } => path(&printer, cli.json, &input.load()?, from, to, algorithm),
        Command::Mst { input, algorithm } => mst(&printer, cli.json, &input.load()?, algorithm),
        Command::Flow {
            input,
            source,
            drain,
            algorithm,
        } => flow(&printer, cli.json, &input.load()?, source, drain, algorithm),
        Command::Stats { input } => {
            let stats = GraphStats::of(&input.load()?);
            if cli.json {
                return emit(&stats);
            }
            print!("{}", printer.print_stats(&stats));
            Ok(())
        }
    }
}

fn grid_flow(
    printer: &Printer,
    json: bool,
    width: usize,
    height: usize,
    seed: Option<u64>,
    max_capacity: u32,
) -> Result<()> {
    if width < 2 || height == 0 {
        bail!("网格至少需要 2 列 1 行，实际为 {}x{}", width, height);
    }
    if max_capacity == 0 {
        bail!("容量上限必须大于 0");
    }

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = grid2d(width, height);
    let pairs: Vec<_> = graph.edges().into_iter().map(|e| (*e.a, *e.b)).collect();
    for (a, b) in pairs {
        graph.connect(a, b, rng.gen_range(0..max_capacity));
    }
    tracing::info!(width, height, seed, edges = graph.edge_count() / 2, "grid generated");

    let source = (width / 20, height / 2);
    let drain = (width - 1 - width / 20, height / 2);
    let mut runs = Vec::new();
    for algorithm in [MaxFlowAlgorithm::EdmondsKarp, MaxFlowAlgorithm::Dinic] {
        let start = Instant::now();
        let result = algorithm::max_flow_with(&graph, &source, &drain, |c: &u32| f64::from(*c), algorithm)?;
        runs.push(FlowRun {
            algorithm,
            value: result.value(),
            elapsed_ms: start.elapsed().as_millis(),
        });
    }
    if runs.windows(2).any(|w| w[0].value != w[1].value) {
        tracing::warn!("max flow algorithms disagree");
    }

    let report = GridFlowReport {
        width,
        height,
        seed,
        source,
        drain,
        runs,
    };
    if json {
        return emit(&report);
    }

    print!(
        "{}",
        Printer::heading(&format!(
            "{}x{} grid, seed {}, {:?} -> {:?}",
            width, height, seed, source, drain
        ))
    );
    let rows: Vec<Vec<String>> = report
        .runs
        .iter()
        .map(|run| vec![run.algorithm.to_string(), format_number(run.value), run.elapsed_ms.to_string()])
        .collect();
    let total: u128 = report.runs.iter().map(|run| run.elapsed_ms).sum();
    print!("{}", printer.print_result(&["Algorithm", "Max Flow", "Time (ms)"], &rows, total));
    Ok(())
}

fn path(
    printer: &Printer,
    json: bool,
    graph: &HashGraph<String, f64>,
    from: String,
    to: String,
    mode: PathMode,
) -> Result<()> {
    for node in [&from, &to] {
        if !graph.contains(node) {
            bail!("节点 {} 不在图中", node);
        }
    }

    let start = Instant::now();
    let found = match mode {
        PathMode::AStar => algorithm::shortest_path(graph, &from, &to, |w: &f64| *w)
            .map(|p| (p.as_slice().to_vec(), p.path().weights().to_vec())),
        PathMode::Bfs | PathMode::Dfs => {
            let order = match mode {
                PathMode::Dfs => AnyPathAlgorithm::DepthFirst,
                _ => AnyPathAlgorithm::BreadthFirst,
            };
            algorithm::any_path_with(graph, &from, &to, order).map(|p| (p.as_slice().to_vec(), p.weights().to_vec()))
        }
    };
    let elapsed = start.elapsed().as_millis();

    let report = match found {
        Some((nodes, weights)) => PathReport {
            distance: Some(weights.iter().sum()),
            from,
            to,
            found: true,
            nodes,
            weights,
        },
        None => PathReport {
            from,
            to,
            found: false,
            nodes: Vec::new(),
            weights: Vec::new(),
            distance: None,
        },
    };
    if json {
        return emit(&report);
    }

    if !report.found {
        println!("{} 到 {} 之间没有路径", report.from, report.to);
        return Ok(());
    }
    let mut distance = 0.0;
    let mut rows = Vec::with_capacity(report.nodes.len());
    for (i, node) in report.nodes.iter().enumerate() {
        let edge = if i == 0 { "-".to_string() } else { format_number(report.weights[i - 1]) };
        if i > 0 {
            distance += report.weights[i - 1];
        }
        rows.push(vec![i.to_string(), node.clone(), edge, format_number(distance)]);
    }
    print!("{}", printer.print_result(&["#", "Node", "Edge", "Distance"], &rows, elapsed));
    Ok(())
}

fn mst(printer: &Printer, json: bool, graph: &HashGraph<String, f64>, mode: MstMode) -> Result<()> {
    let algorithm: MstAlgorithm = mode.into();
    let start = Instant::now();
    let tree = algorithm::minimal_spanning_tree_with(graph, |a: &f64, b: &f64| a.total_cmp(b), algorithm);
    let elapsed = start.elapsed().as_millis();

    let mut edges = Vec::new();
    for child in preorder(&tree) {
        let Some(parent) = tree.parent(&child) else {
            continue;
        };
        let weight = tree.edge(parent, &child).copied().unwrap_or_default();
        edges.push(TreeEdge {
            parent: parent.clone(),
            child,
            weight,
        });
    }
    let report = MstReport {
        algorithm,
        root: tree.root().cloned(),
        covered: tree.size(),
        nodes: graph.size(),
        total_weight: edges.iter().map(|e| e.weight).sum(),
        edges,
    };
    if report.covered < report.nodes {
        tracing::warn!(covered = report.covered, nodes = report.nodes, "graph is disconnected, tree covers the root component only");
    }
    if json {
        return emit(&report);
    }

    let rows: Vec<Vec<String>> = report
        .edges
        .iter()
        .map(|e| vec![e.parent.clone(), e.child.clone(), format_number(e.weight)])
        .collect();
    print!("{}", printer.print_result(&["Parent", "Child", "Weight"], &rows, elapsed));
    println!("Total weight: {}", format_number(report.total_weight));
    Ok(())
}

fn flow(
    printer: &Printer,
    json: bool,
    graph: &HashGraph<String, f64>,
    source: String,
    drain: String,
    mode: FlowMode,
) -> Result<()> {
    let algorithm: MaxFlowAlgorithm = mode.into();
    let start = Instant::now();
    let result = algorithm::max_flow_with(graph, &source, &drain, |w: &f64| *w, algorithm)?;
    let elapsed = start.elapsed().as_millis();

    let edges = result
        .edges()
        .into_iter()
        .map(|e| FlowEdge {
            from: e.a.clone(),
            to: e.b.clone(),
            flow: *e.weight,
        })
        .collect();
    let mut source_side: Vec<String> = result.source_side().iter().cloned().collect();
    source_side.sort();
    let report = FlowReport {
        source,
        drain,
        algorithm,
        value: result.value(),
        elapsed_ms: elapsed,
        edges,
        source_side,
    };
    if json {
        return emit(&report);
    }

    print!(
        "{}",
        Printer::heading(&format!(
            "{}: {} -> {} = {}",
            report.algorithm,
            report.source,
            report.drain,
            format_number(report.value)
        ))
    );
    let rows: Vec<Vec<String>> = report
        .edges
        .iter()
        .map(|e| vec![e.from.clone(), e.to.clone(), format_number(e.flow)])
        .collect();
    print!("{}", printer.print_result(&["From", "To", "Flow"], &rows, elapsed));
    println!("Source side: {}", report.source_side.join(", "));
    Ok(())
}
