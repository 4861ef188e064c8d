//! 残量图的边定义
//!
//! 每条管道在残量图中对应一条正向边和一条反向（残量）边

use serde::{Deserialize, Serialize};

/// 残量图中的一条边
///
/// `twin` 是配对反向边在 `target` 邻接表中的下标，
/// 两条边通过下标而不是引用互相关联。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// 目标节点
    pub target: usize,
    /// 容量上限
    pub capacity: i64,
    /// 当前流量
    pub flow: i64,
    /// 单位流量成本，反向边为正向边成本的相反数
    pub cost: i64,
    /// 配对边在目标节点邻接表中的下标
    pub twin: usize,
}

impl FlowEdge {
    pub(crate) fn new(target: usize, capacity: i64, cost: i64, twin: usize) -> Self {
        Self {
            target,
            capacity,
            flow: 0,
            cost,
            twin,
        }
    }

    /// 剩余可推送的流量
    pub fn residual_capacity(&self) -> i64 {
        self.capacity - self.flow
    }

    /// 是否为真实管道（`cost >= 0`）
    ///
    /// 报告类模块依赖这一符号约定来忽略反向边。零成本边的反向边同样满足
    /// `cost >= 0`，但其容量为 0 且流量不为正，报告会再按流量或容量过滤。
    pub fn is_pipe(&self) -> bool {
        self.cost >= 0
    }

    /// 是否满载
    pub fn is_saturated(&self) -> bool {
        self.capacity > 0 && self.flow == self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residual_capacity() {
        let mut e = FlowEdge::new(3, 10, 2, 0);
        assert_eq!(e.residual_capacity(), 10);
        assert!(e.is_pipe());
        assert!(!e.is_saturated());

        e.flow = 10;
        assert_eq!(e.residual_capacity(), 0);
        assert!(e.is_saturated());
    }

    #[test]
    fn test_twin_edge_residual() {
        // 反向边容量为 0，流量为负时才有剩余容量
        let mut twin = FlowEdge::new(1, 0, -2, 0);
        assert!(!twin.is_pipe());
        assert_eq!(twin.residual_capacity(), 0);

        twin.flow = -4;
        assert_eq!(twin.residual_capacity(), 4);
        assert!(!twin.is_saturated());
    }
}
