//! 最小费用最大流
//!
//! 连续最短路（Successive Shortest Paths）：反复用 Bellman-Ford 找当前
//! 最便宜的增广路径并沿其推送瓶颈流量，直到汇点不可达。

use super::bellman_ford::ShortestPathOracle;
use crate::graph::ResidualGraph;
use serde::{Deserialize, Serialize};

/// 最小费用最大流结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MinCostFlow {
    /// 最大流量
    pub max_flow: i64,
    /// 该流量下的最小总成本
    pub min_cost: i64,
    /// 增广次数
    pub augmentations: usize,
}

/// 连续最短路算法
///
/// 增广过程中原地修改图中各边的流量，结束后图即为最终分配方案。
pub struct SuccessiveShortestPaths<'a> {
    graph: &'a mut ResidualGraph,
    oracle: ShortestPathOracle,
}

impl<'a> SuccessiveShortestPaths<'a> {
    /// 创建算法实例
    pub fn new(graph: &'a mut ResidualGraph) -> Self {
        Self {
            graph,
            oracle: ShortestPathOracle::new(),
        }
    }

    /// 计算从 `source` 到 `sink` 的最小费用最大流
    pub fn run(&mut self, source: usize, sink: usize) -> MinCostFlow {
        let mut result = MinCostFlow::default();

        loop {
            let path = self.oracle.search(self.graph, source, sink);
            if !path.is_found() {
                break;
            }

            result.max_flow += path.flow;
            result.min_cost += path.flow * path.cost;
            result.augmentations += 1;

            // 沿前驱链增广
            for (node, index) in self.oracle.path(source, sink) {
                self.graph.push_flow(node, index, path.flow);
            }

            tracing::debug!(
                round = result.augmentations,
                flow = path.flow,
                unit_cost = path.cost,
                "增广"
            );
        }

        tracing::info!(
            max_flow = result.max_flow,
            min_cost = result.min_cost,
            augmentations = result.augmentations,
            "最小费用最大流计算完成"
        );

        result
    }
}

/// 便捷函数：在 `graph` 上计算最小费用最大流
pub fn min_cost_max_flow(graph: &mut ResidualGraph, source: usize, sink: usize) -> MinCostFlow {
    SuccessiveShortestPaths::new(graph).run(source, sink)
}
