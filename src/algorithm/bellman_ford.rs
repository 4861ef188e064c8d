//! 最短增广路径
//!
//! 在残量图上运行 Bellman-Ford。反向边带负成本，因此不能使用 Dijkstra。
//!
//! 前提：残量图中不存在负成本环。真实管道成本非负、反向边只由
//! `ResidualGraph::add_edge` 成对引入，而连续最短路每次都沿当前最短路径增广，
//! 这一性质在整个增广过程中保持成立。算法不检测负环；
//! 若将来允许负成本管道，轮数上限会让结果静默出错。
//!
//! 距离用普通 `i64` 加法累计，数值范围由 `NetworkBuilder::check_bounds` 预先检查。

use crate::graph::ResidualGraph;
use serde::{Deserialize, Serialize};

/// 一次搜索的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径瓶颈流量
    pub flow: i64,
    /// 路径单位成本
    pub cost: i64,
}

impl PathResult {
    /// 汇点不可达
    pub const NONE: PathResult = PathResult { flow: 0, cost: 0 };

    pub fn is_found(&self) -> bool {
        self.flow > 0
    }
}

/// 最短增广路径查找器
///
/// 距离、前驱和瓶颈数组归查找器所有，每次搜索前重置。
#[derive(Debug, Default)]
pub struct ShortestPathOracle {
    dist: Vec<Option<i64>>,
    bottleneck: Vec<i64>,
    parent_node: Vec<Option<usize>>,
    parent_edge: Vec<Option<usize>>,
}

impl ShortestPathOracle {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, n: usize) {
        self.dist.clear();
        self.dist.resize(n, None);
        self.bottleneck.clear();
        self.bottleneck.resize(n, 0);
        self.parent_node.clear();
        self.parent_node.resize(n, None);
        self.parent_edge.clear();
        self.parent_edge.resize(n, None);
    }

    /// 查找 `s` 到 `t` 的最便宜增广路径
    ///
    /// 返回路径瓶颈流量和单位成本；不可达时返回 [`PathResult::NONE`]，
    /// 这是增广循环的正常结束信号。
    pub fn search(&mut self, graph: &ResidualGraph, s: usize, t: usize) -> PathResult {
        let n = graph.node_count();
        self.reset(n);

        self.dist[s] = Some(0);
        self.bottleneck[s] = i64::MAX;

        // 最多 |V| - 1 轮松弛
        for _ in 1..n {
            let mut updated = false;

            for u in 0..n {
                let Some(du) = self.dist[u] else {
                    continue;
                };

                for (index, edge) in graph.edges(u).iter().enumerate() {
                    let residual = edge.residual_capacity();
                    if residual <= 0 {
                        continue;
                    }

                    let v = edge.target;
                    let candidate = du + edge.cost;
                    if self.dist[v].map_or(true, |dv| dv > candidate) {
                        self.dist[v] = Some(candidate);
                        self.parent_node[v] = Some(u);
                        self.parent_edge[v] = Some(index);
                        self.bottleneck[v] = self.bottleneck[u].min(residual);
                        updated = true;
                    }
                }
            }

            if !updated {
                break;
            }
        }

        match self.dist[t] {
            Some(cost) if t != s => PathResult {
                flow: self.bottleneck[t],
                cost,
            },
            _ => PathResult::NONE,
        }
    }

    /// 上一次搜索得到的路径，按 `t` 到 `s` 的顺序返回 `(节点, 出边下标)`
    ///
    /// 只应在 `search` 找到路径后调用。
    pub fn path(&self, s: usize, t: usize) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        let mut v = t;
        while v != s {
            match (self.parent_node[v], self.parent_edge[v]) {
                (Some(u), Some(index)) => {
                    edges.push((u, index));
                    v = u;
                }
                _ => break,
            }
        }
        edges
    }

    /// 上一次搜索中 `node` 的最短距离
    pub fn distance(&self, node: usize) -> Option<i64> {
        self.dist.get(node).copied().flatten()
    }
}
