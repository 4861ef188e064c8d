//! 图核心模块
//!
//! 定义残量图的边、邻接结构以及流网络的构建

mod builder;
mod edge;
mod network;

pub use builder::{FlowNetwork, NetworkBuilder};
pub use edge::FlowEdge;
pub use network::ResidualGraph;
