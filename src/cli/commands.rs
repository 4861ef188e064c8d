//! 交互命令处理
//!
//! 会话持有已加载的数据和最近一次分析结果，分析后的查询都基于该结果

use std::path::PathBuf;

use super::printer;
use crate::analysis::{run_analysis, Analysis};
use crate::config::{AnalysisConfig, MAX_PRIORITY_PENALTY};
use crate::error::{Error, Result};
use crate::import::Dataset;

/// 命令执行结果
#[derive(Debug)]
pub enum CommandResult {
    /// 继续运行
    Continue,
    /// 退出程序
    Exit,
    /// 显示消息
    Message(String),
    /// 错误
    Error(String),
}

/// 会话状态
#[derive(Debug, Default)]
pub struct Session {
    config: AnalysisConfig,
    dataset: Option<Dataset>,
    analysis: Option<Analysis>,
}

impl Session {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            dataset: None,
            analysis: None,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_ref()
    }

    /// 加载数据，丢弃之前的分析结果
    pub fn load(&mut self, path: Option<PathBuf>) -> Result<String> {
        let path = path.unwrap_or_else(|| self.config.data_file.clone());
        let (dataset, stats) = Dataset::load(&path)?;

        self.analysis = None;
        self.dataset = Some(dataset);

        Ok(format!(
            "已从 {} 加载 {} 个地点、{} 条管道（跳过 {} 条无效记录）\n",
            path.display(),
            stats.places,
            stats.connections,
            stats.skipped
        ))
    }

    /// 运行分配分析
    pub fn analyze(&mut self) -> Result<String> {
        let dataset = self.dataset.as_ref().ok_or(Error::NothingToAnalyze)?;
        let analysis = run_analysis(dataset, &self.config)?;

        let output = format!(
            "{}{}",
            printer::format_summary(&analysis.summary()),
            printer::format_allocations(&analysis.allocations())
        );
        self.analysis = Some(analysis);
        Ok(output)
    }

    fn require_analysis(&self) -> Result<&Analysis> {
        self.analysis.as_ref().ok_or(Error::NoAnalysis)
    }

    fn resolve(&self, key: &str) -> Result<usize> {
        self.dataset
            .as_ref()
            .and_then(|d| d.resolve(key))
            .ok_or_else(|| Error::InvalidPlace(key.to_string()))
    }

    /// 查询两地之间的一条输水路径
    pub fn transfer(&self, from: &str, to: &str) -> Result<String> {
        let analysis = self.require_analysis()?;
        let (from, to) = (self.resolve(from)?, self.resolve(to)?);
        let transfer = analysis.trace_transfer(from, to)?;

        let places = analysis.places();
        Ok(printer::format_transfer(
            &places[from],
            &places[to],
            transfer.as_ref(),
            places,
        ))
    }

    pub fn bottlenecks(&self) -> Result<String> {
        let analysis = self.require_analysis()?;
        Ok(printer::format_bottlenecks(&analysis.bottlenecks()))
    }

    pub fn crops(&self) -> Result<String> {
        let analysis = self.require_analysis()?;
        Ok(printer::format_crop_reports(&analysis.crop_reports()))
    }

    /// 修改优先级惩罚权重；已有分析结果作废
    pub fn set_penalty(&mut self, penalty: i64) -> String {
        self.config.priority_penalty = penalty;
        self.analysis = None;
        format!("优先级惩罚权重已设为 {}，请重新运行 analyze\n", penalty)
    }
}

/// 解析并执行一条命令
pub fn execute_command(input: &str, session: &mut Session) -> CommandResult {
    let input = input.trim();
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return CommandResult::Continue;
    };
    let cmd = first.to_lowercase();
    let args = &parts[1..];

    let result = match cmd.as_str() {
        "quit" | "exit" | "q" => return CommandResult::Exit,

        "help" | "h" | "?" => Ok(get_help_text()),

        "load" | "l" => session.load(args.first().map(PathBuf::from)),

        "show" | "display" | "data" => match session.dataset() {
            Some(d) if !d.is_empty() => Ok(printer::format_dataset(d.places(), d.connections())),
            _ => Ok("尚未加载数据。\n".to_string()),
        },

        "analyze" | "run" | "a" => session.analyze(),

        "transfer" | "path" | "t" => match args {
            [from, to, ..] => session.transfer(from, to),
            _ => return CommandResult::Error("用法: transfer <源地点> <目标地点>".to_string()),
        },

        "bottlenecks" | "bottleneck" | "b" => session.bottlenecks(),

        "crops" | "c" => session.crops(),

        "penalty" => match args.first() {
            None => Ok(format!(
                "当前优先级惩罚权重: {}\n",
                session.config().priority_penalty
            )),
            Some(value) => match value.parse::<i64>() {
                Ok(penalty) if (0..=MAX_PRIORITY_PENALTY).contains(&penalty) => {
                    Ok(session.set_penalty(penalty))
                }
                _ => {
                    return CommandResult::Error(format!(
                        "用法: penalty <0 到 {} 之间的整数>",
                        MAX_PRIORITY_PENALTY
                    ))
                }
            },
        },

        _ => {
            return CommandResult::Error(format!("未知命令: {}。输入 'help' 查看帮助。", cmd));
        }
    };

    match result {
        Ok(message) => CommandResult::Message(message),
        Err(Error::NothingToAnalyze) => {
            CommandResult::Message("没有可分析的数据，请先执行 load。\n".to_string())
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn get_help_text() -> String {
    r#"
═══════════════════════════════════════════════════════════════
                   WaterFlow 命令帮助
═══════════════════════════════════════════════════════════════

数据:
  load, l [文件]           加载数据文件（默认使用配置中的文件）
  show, display            显示已加载的地点和管道
  penalty [权重]           查看或设置优先级惩罚权重

分析:
  analyze, run, a          运行最小费用最大流分配分析

分析后查询（基于最近一次分析）:
  transfer, t <源> <目标>  查询两地之间的一条输水路径
                           地点可用 ID 或名称，例如: transfer 0 Greenfield
  bottlenecks, b           列出满载运行的管道
  crops, c                 缺水农业地点的作物建议

其他:
  help, h, ?               显示帮助
  quit, exit, q            退出程序

═══════════════════════════════════════════════════════════════
"#
    .to_string()
}
