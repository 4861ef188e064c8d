//! WaterFlow 批量分析工具
//!
//! 读取数据文件，运行一次分配分析并输出完整报告

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use waterflow::analysis::{AnalysisSummary, Bottleneck, CropReport, PlaceAllocation};
use waterflow::cli::printer;
use waterflow::config::{
    AnalysisConfig, DEFAULT_DATA_FILE, DEFAULT_PRIORITY_PENALTY, MAX_PRIORITY_PENALTY,
};
use waterflow::{run_analysis, Dataset, Error, ImportStats};

#[derive(Parser, Debug)]
#[command(name = "waterflow-analyze")]
#[command(about = "WaterFlow 批量分析工具")]
struct Args {
    /// 输入文件路径
    #[arg(short, long, default_value = DEFAULT_DATA_FILE)]
    input: PathBuf,

    /// 优先级惩罚权重
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PRIORITY_PENALTY,
        value_parser = clap::value_parser!(i64).range(0..=MAX_PRIORITY_PENALTY)
    )]
    priority_penalty: i64,

    /// 以 JSON 输出报告
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    import: ImportStats,
    summary: AnalysisSummary,
    allocations: Vec<PlaceAllocation>,
    bottlenecks: Vec<Bottleneck>,
    crop_reports: Vec<CropReport>,
    duration_ms: u128,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AnalysisConfig::new()
        .with_data_file(&args.input)
        .with_priority_penalty(args.priority_penalty);

    let (dataset, stats) = Dataset::load(&config.data_file)
        .with_context(|| format!("无法读取数据文件 {}", config.data_file.display()))?;

    let start = Instant::now();
    let analysis = match run_analysis(&dataset, &config) {
        Ok(analysis) => analysis,
        Err(Error::NothingToAnalyze) => {
            println!("数据文件中没有有效地点，无需分析。");
            return Ok(());
        }
        Err(e) => return Err(e).context("分析失败"),
    };
    let duration_ms = start.elapsed().as_millis();

    if args.json {
        let report = Report {
            import: stats,
            summary: analysis.summary(),
            allocations: analysis.allocations(),
            bottlenecks: analysis.bottlenecks(),
            crop_reports: analysis.crop_reports(),
            duration_ms,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("WaterFlow 批量分析");
    println!("==================");
    println!("输入文件: {}", config.data_file.display());
    println!("优先级惩罚权重: {}", config.priority_penalty);
    println!(
        "导入: {} 个地点, {} 条管道, 跳过 {} 条",
        stats.places, stats.connections, stats.skipped
    );
    println!("耗时: {} ms\n", duration_ms);

    print!("{}", printer::format_summary(&analysis.summary()));
    print!("{}", printer::format_allocations(&analysis.allocations()));
    print!("{}", printer::format_bottlenecks(&analysis.bottlenecks()));
    print!("{}", printer::format_crop_reports(&analysis.crop_reports()));

    Ok(())
}
