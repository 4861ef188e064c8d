//! 输水路径追踪
//!
//! 在最终分配方案上查找一条从盈余地点到缺水地点、每段都有正流量的管道路径。
//!
//! 这是一个简化查询：流量可能在多条路径间拆分和汇合，这里只报告深度优先
//! 找到的第一条路径，不代表两地之间的全部输水量或总成本。

use crate::error::{Error, Result};
use crate::graph::{FlowEdge, ResidualGraph};
use crate::types::{Place, PlaceId};
use serde::{Deserialize, Serialize};

/// 单条路径的追踪结果（部分视图）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglePathTransfer {
    /// 路径上的地点序列
    pub places: Vec<PlaceId>,
    /// 路径瓶颈：路径上各管道流量的最小值
    pub flow: i64,
    /// 路径上各管道 `流量 × 单位成本` 之和
    pub cost: i64,
}

impl SinglePathTransfer {
    fn with_start(start: PlaceId) -> Self {
        Self {
            places: vec![start],
            flow: i64::MAX,
            cost: 0,
        }
    }

    /// 路径段数
    pub fn length(&self) -> usize {
        self.places.len().saturating_sub(1)
    }
}

/// 输水路径追踪器
pub struct TransferTracer<'a> {
    graph: &'a ResidualGraph,
    places: &'a [Place],
}

impl<'a> TransferTracer<'a> {
    /// 创建追踪器；`places` 为参与分析的全部真实地点
    pub fn new(graph: &'a ResidualGraph, places: &'a [Place]) -> Self {
        Self { graph, places }
    }

    /// 追踪 `from`（盈余）到 `to`（缺水）的一条正流量路径
    ///
    /// 找不到时返回 `Ok(None)`。
    pub fn trace(&self, from: PlaceId, to: PlaceId) -> Result<Option<SinglePathTransfer>> {
        let source = self.place(from)?;
        let target = self.place(to)?;

        if !source.is_surplus() {
            return Err(Error::NotSurplus(source.name.clone()));
        }
        if !target.is_deficit() {
            return Err(Error::NotDeficit(target.name.clone()));
        }

        Ok(self.first_path(from, to))
    }

    fn place(&self, id: PlaceId) -> Result<&'a Place> {
        self.places
            .get(id)
            .ok_or_else(|| Error::InvalidPlace(id.to_string()))
    }

    /// 按插入顺序深度优先（显式栈），返回找到的第一条路径
    fn first_path(&self, from: PlaceId, to: PlaceId) -> Option<SinglePathTransfer> {
        let mut on_path = vec![false; self.places.len()];
        // (节点, 下一条待检查的出边下标)
        let mut stack: Vec<(PlaceId, usize)> = vec![(from, 0)];
        let mut hops: Vec<&FlowEdge> = Vec::new();
        on_path[from] = true;

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            if node == to {
                return Some(Self::collect(&stack, &hops));
            }

            let edges = self.graph.edges(node);
            let Some(edge) = edges.get(cursor) else {
                // 回溯
                on_path[node] = false;
                stack.pop();
                hops.pop();
                continue;
            };
            frame.1 += 1;

            let next = edge.target;
            // 只走真实地点之间、有正流量的正向管道
            if next >= self.places.len() || on_path[next] || edge.flow <= 0 || !edge.is_pipe() {
                continue;
            }

            on_path[next] = true;
            hops.push(edge);
            stack.push((next, 0));
        }

        None
    }

    fn collect(stack: &[(PlaceId, usize)], hops: &[&FlowEdge]) -> SinglePathTransfer {
        let mut path = SinglePathTransfer::with_start(stack[0].0);
        for (&(place, _), edge) in stack[1..].iter().zip(hops) {
            path.places.push(place);
            path.flow = path.flow.min(edge.flow);
            path.cost += edge.flow * edge.cost;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::min_cost_max_flow;
    use crate::graph::{FlowNetwork, NetworkBuilder};
    use crate::types::{Connection, SoilType};

    fn solved() -> (Vec<Place>, FlowNetwork) {
        // 0 (盈余 10) -> 1 (中转) -> 2 (缺 6)
        //           \-> 3 (缺 4)
        let places = vec![
            Place::new(0, "Dam", 10, 3, SoilType::None),
            Place::new(1, "Hub", 0, 3, SoilType::None),
            Place::new(2, "Farm", -6, 1, SoilType::Loam),
            Place::new(3, "Town", -4, 2, SoilType::None),
            Place::new(4, "Lake", 5, 3, SoilType::None),
        ];
        let connections = vec![
            Connection::new(0, 1, 8, 2),
            Connection::new(1, 2, 8, 3),
            Connection::new(0, 3, 5, 1),
        ];
        let mut net = NetworkBuilder::new(1000).build(&places, &connections);
        let (s, t) = (net.source, net.sink);
        min_cost_max_flow(&mut net.graph, s, t);
        (places, net)
    }

    #[test]
    fn test_trace_multi_hop() {
        let (places, net) = solved();
        let tracer = TransferTracer::new(&net.graph, &places);

        let path = tracer.trace(0, 2).unwrap().unwrap();
        assert_eq!(path.places, vec![0, 1, 2]);
        assert_eq!(path.length(), 2);
        assert_eq!(path.flow, 6);
        // 6 × 2 + 6 × 3
        assert_eq!(path.cost, 30);
    }

    #[test]
    fn test_trace_direct() {
        let (places, net) = solved();
        let tracer = TransferTracer::new(&net.graph, &places);

        let path = tracer.trace(0, 3).unwrap().unwrap();
        assert_eq!(path.places, vec![0, 3]);
        assert_eq!((path.flow, path.cost), (4, 4));
    }

    #[test]
    fn test_trace_without_flow() {
        let (places, net) = solved();
        let tracer = TransferTracer::new(&net.graph, &places);

        // Lake 没有任何管道
        assert!(tracer.trace(4, 2).unwrap().is_none());
    }

    #[test]
    fn test_trace_long_chain() {
        const LEN: usize = 50_000;

        let places: Vec<Place> = (0..LEN)
            .map(|id| {
                let balance = match id {
                    0 => 3,
                    id if id == LEN - 1 => -3,
                    _ => 0,
                };
                Place::new(id, format!("P{}", id), balance, 1, SoilType::None)
            })
            .collect();
        let connections: Vec<Connection> =
            (1..LEN).map(|id| Connection::new(id - 1, id, 5, 1)).collect();

        let mut net = NetworkBuilder::new(1000).build(&places, &connections);
        let (s, t) = (net.source, net.sink);
        min_cost_max_flow(&mut net.graph, s, t);

        let path = TransferTracer::new(&net.graph, &places)
            .trace(0, LEN - 1)
            .unwrap()
            .unwrap();
        assert_eq!(path.length(), LEN - 1);
        assert_eq!(path.flow, 3);
        assert_eq!(path.cost, 3 * (LEN as i64 - 1));
    }

    #[test]
    fn test_trace_validation() {
        let (places, net) = solved();
        let tracer = TransferTracer::new(&net.graph, &places);

        assert!(matches!(tracer.trace(9, 2), Err(Error::InvalidPlace(_))));
        assert!(matches!(tracer.trace(1, 2), Err(Error::NotSurplus(_))));
        assert!(matches!(tracer.trace(0, 1), Err(Error::NotDeficit(_))));
    }
}
