//! 流网络构建
//!
//! 把地点和管道转换为残量图，并追加超级源点和超级汇点：
//! 盈余地点由超级源点供水，缺水地点向超级汇点排水，
//! 汇点边的成本按优先级加权。

use super::network::ResidualGraph;
use crate::error::{Error, Result};
use crate::types::{Connection, Place};
use serde::{Deserialize, Serialize};

/// 一次分析使用的流网络
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNetwork {
    /// 残量图（真实地点在前，超级源点和超级汇点在最后）
    pub graph: ResidualGraph,
    /// 超级源点
    pub source: usize,
    /// 超级汇点
    pub sink: usize,
    /// 真实地点数量
    pub place_count: usize,
    /// 总可供水量
    pub total_supply: i64,
    /// 总需水量
    pub total_demand: i64,
}

impl FlowNetwork {
    /// 节点是否为超级源点或超级汇点
    pub fn is_virtual(&self, node: usize) -> bool {
        node >= self.place_count
    }

    /// 地点向超级汇点送出的水量（即该地点实际获得的水量）
    pub fn delivered_to(&self, place: usize) -> i64 {
        self.graph
            .edges(place)
            .iter()
            .filter(|e| e.target == self.sink && e.is_pipe() && e.capacity > 0)
            .map(|e| e.flow)
            .sum()
    }

    /// 超级源点向地点注入的水量（即该地点实际供出的水量）
    pub fn supplied_by(&self, place: usize) -> i64 {
        self.graph
            .edges(self.source)
            .iter()
            .filter(|e| e.target == place && e.capacity > 0)
            .map(|e| e.flow)
            .sum()
    }
}

/// 网络构建器
#[derive(Debug, Clone, Copy)]
pub struct NetworkBuilder {
    priority_penalty: i64,
}

impl NetworkBuilder {
    /// `priority_penalty`：优先级每降低一级，汇点边单位成本的增量
    pub fn new(priority_penalty: i64) -> Self {
        Self { priority_penalty }
    }

    /// 优先级对应的汇点边成本，优先级 1 为 0
    pub fn sink_cost(&self, priority: u8) -> i64 {
        (i64::from(priority) - 1).saturating_mul(self.priority_penalty)
    }

    /// 检查该数据上的最小费用最大流不会发生 `i64` 溢出
    ///
    /// 设 `C` 为所有边单位成本绝对值的最大值、`F` 为总供给：Bellman-Ford
    /// 的距离不超过 `|V| × C`，累计成本不超过 `F × |V| × C`。
    pub fn check_bounds(&self, places: &[Place], connections: &[Connection]) -> Result<()> {
        let overflow = |what: &str| Error::Overflow(what.to_string());

        let mut max_cost: i64 = 0;
        for conn in connections {
            let cost = conn.cost.checked_abs().ok_or_else(|| overflow("管道成本"))?;
            max_cost = max_cost.max(cost);
        }

        let mut total_supply: i64 = 0;
        let mut total_demand: i64 = 0;
        for place in places {
            if place.is_surplus() {
                total_supply = total_supply
                    .checked_add(place.balance)
                    .ok_or_else(|| overflow("总供给"))?;
            } else if place.is_deficit() {
                let demand = place.balance.checked_neg().ok_or_else(|| overflow("缺水量"))?;
                total_demand = total_demand
                    .checked_add(demand)
                    .ok_or_else(|| overflow("总需求"))?;
                let sink = (i64::from(place.priority) - 1)
                    .checked_mul(self.priority_penalty)
                    .and_then(i64::checked_abs)
                    .ok_or_else(|| overflow("优先级惩罚"))?;
                max_cost = max_cost.max(sink);
            }
        }

        let nodes = i64::try_from(places.len() + 2).map_err(|_| overflow("节点数"))?;
        nodes
            .checked_mul(max_cost)
            .and_then(|distance| distance.checked_mul(total_supply.max(1)))
            .ok_or_else(|| overflow("路径成本"))?;

        Ok(())
    }

    /// 构建流网络
    ///
    /// 地点 ID 必须与其下标一致，管道端点必须在范围内（由加载器保证）。
    pub fn build(&self, places: &[Place], connections: &[Connection]) -> FlowNetwork {
        let place_count = places.len();
        let source = place_count;
        let sink = place_count + 1;
        let mut graph = ResidualGraph::new(place_count + 2);

        for conn in connections {
            graph.add_edge(conn.from, conn.to, conn.capacity, conn.cost);
        }

        let mut total_supply = 0;
        let mut total_demand = 0;

        for place in places {
            if place.is_surplus() {
                total_supply += place.balance;
                graph.add_edge(source, place.id, place.balance, 0);
            } else if place.is_deficit() {
                let required = place.demand();
                total_demand += required;
                graph.add_edge(place.id, sink, required, self.sink_cost(place.priority));
            }
        }

        tracing::debug!(
            places = place_count,
            pipes = connections.len(),
            total_supply,
            total_demand,
            "流网络已构建"
        );

        FlowNetwork {
            graph,
            source,
            sink,
            place_count,
            total_supply,
            total_demand,
        }
    }
}
