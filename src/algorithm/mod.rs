//! 图算法模块
//!
//! 包含最短增广路径、最小费用最大流和输水路径追踪

mod bellman_ford;
mod min_cost_flow;
mod path_tracing;

pub use bellman_ford::{PathResult, ShortestPathOracle};
pub use min_cost_flow::{min_cost_max_flow, MinCostFlow, SuccessiveShortestPaths};
pub use path_tracing::{SinglePathTransfer, TransferTracer};
