//! WaterFlow - 水资源分配规划
//!
//! 在由盈余地点、缺水地点和管道组成的网络上分配水资源：
//! - 基于连续最短路（Bellman-Ford）的最小费用最大流引擎
//! - 超级源点/超级汇点建模，按优先级对未满足需求加权惩罚
//! - 瓶颈报告、作物建议和输水路径追踪
//! - 文本数据导入与交互式命令行

pub mod algorithm;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{min_cost_max_flow, MinCostFlow, PathResult, ShortestPathOracle};
pub use analysis::{run_analysis, Analysis, AnalysisSummary};
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use graph::{FlowEdge, FlowNetwork, NetworkBuilder, ResidualGraph};
pub use import::{Dataset, ImportStats};
pub use types::{Connection, Place, PlaceId, SoilType};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
