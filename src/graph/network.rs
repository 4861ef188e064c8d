//! 残量图
//!
//! 按节点 ID 索引的邻接表，插入顺序决定搜索时的先后次序

use super::edge::FlowEdge;
use serde::{Deserialize, Serialize};

/// 残量图
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResidualGraph {
    adj: Vec<Vec<FlowEdge>>,
}

impl ResidualGraph {
    /// 创建含 `node_count` 个孤立节点的图
    pub fn new(node_count: usize) -> Self {
        Self {
            adj: vec![Vec::new(); node_count],
        }
    }

    /// 节点数
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// 边数（含反向边）
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    /// 节点的出边（按插入顺序）
    pub fn edges(&self, node: usize) -> &[FlowEdge] {
        &self.adj[node]
    }

    /// 获取单条边
    pub fn edge(&self, node: usize, index: usize) -> &FlowEdge {
        &self.adj[node][index]
    }

    /// 配对的反向边
    pub fn twin_of(&self, node: usize, index: usize) -> &FlowEdge {
        let edge = &self.adj[node][index];
        &self.adj[edge.target][edge.twin]
    }

    /// 遍历所有 `(源节点, 边下标, 边)`
    pub fn iter_edges(&self) -> impl Iterator<Item = (usize, usize, &FlowEdge)> + '_ {
        self.adj
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().enumerate().map(move |(i, e)| (u, i, e)))
    }

    /// 添加容量为 `capacity`、成本为 `cost` 的边 `u -> v`，同时添加
    /// 容量为 0、成本为 `-cost` 的反向边 `v -> u`。
    ///
    /// 这是唯一改变图拓扑的入口。
    ///
    /// # Panics
    ///
    /// `u` 或 `v` 越界时 panic：节点下标由调用方保证有效。
    pub fn add_edge(&mut self, u: usize, v: usize, capacity: i64, cost: i64) {
        let n = self.adj.len();
        assert!(u < n && v < n, "边 {u} -> {v} 越界：图中只有 {n} 个节点");

        let forward_index = self.adj[u].len();
        // 自环时反向边紧跟在正向边之后
        let twin_index = self.adj[v].len() + usize::from(u == v);

        self.adj[u].push(FlowEdge::new(v, capacity, cost, twin_index));
        self.adj[v].push(FlowEdge::new(u, 0, -cost, forward_index));
    }

    /// 沿边 `(node, index)` 推送 `amount` 单位流量，同时从反向边扣除
    pub fn push_flow(&mut self, node: usize, index: usize, amount: i64) {
        let (target, twin) = {
            let edge = &mut self.adj[node][index];
            edge.flow += amount;
            (edge.target, edge.twin)
        };
        self.adj[target][twin].flow -= amount;
    }

    /// 节点的净流出量（出边流量之和，反向边流量为负，自然扣除流入）
    pub fn net_outflow(&self, node: usize) -> i64 {
        self.adj[node].iter().map(|e| e.flow).sum()
    }

    /// 所有边当前流量的快照，顺序与 `iter_edges` 一致
    pub fn flows(&self) -> Vec<i64> {
        self.iter_edges().map(|(_, _, e)| e.flow).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_pairs_twins() {
        let mut g = ResidualGraph::new(3);
        g.add_edge(0, 1, 10, 4);
        g.add_edge(1, 2, 5, 0);
        g.add_edge(0, 2, 7, 3);

        assert_eq!(g.edge_count(), 6);

        for (u, i, e) in g.iter_edges() {
            let twin = g.twin_of(u, i);
            assert_eq!(twin.target, u);
            assert_eq!(twin.cost, -e.cost);
            // 互为配对
            assert_eq!(g.twin_of(e.target, e.twin), e);
        }

        let forward = g.edge(0, 0);
        assert_eq!((forward.target, forward.capacity, forward.cost), (1, 10, 4));
        let back = g.twin_of(0, 0);
        assert_eq!((back.target, back.capacity, back.cost), (0, 0, -4));
    }

    #[test]
    fn test_self_loop_twin() {
        let mut g = ResidualGraph::new(2);
        g.add_edge(1, 1, 3, 2);

        assert_eq!(g.edges(1).len(), 2);
        assert_eq!(g.edge(1, 0).twin, 1);
        assert_eq!(g.edge(1, 1).twin, 0);
        assert_eq!(g.edge(1, 1).capacity, 0);
    }

    #[test]
    fn test_push_flow_updates_twin() {
        let mut g = ResidualGraph::new(2);
        g.add_edge(0, 1, 10, 1);

        g.push_flow(0, 0, 6);
        assert_eq!(g.edge(0, 0).flow, 6);
        assert_eq!(g.edge(0, 0).residual_capacity(), 4);
        assert_eq!(g.edge(1, 0).flow, -6);
        assert_eq!(g.edge(1, 0).residual_capacity(), 6);

        // 沿反向边撤销部分流量
        g.push_flow(1, 0, 2);
        assert_eq!(g.edge(0, 0).flow, 4);
        assert_eq!(g.edge(1, 0).flow, -4);

        assert_eq!(g.net_outflow(0), 4);
        assert_eq!(g.net_outflow(1), -4);
    }

    #[test]
    #[should_panic(expected = "越界")]
    fn test_add_edge_out_of_range() {
        let mut g = ResidualGraph::new(2);
        g.add_edge(0, 2, 1, 1);
    }
}
