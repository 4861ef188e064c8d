//! 地点、管道等基础类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 地点 ID（从 0 开始连续分配）
pub type PlaceId = usize;

/// 最高优先级
pub const HIGHEST_PRIORITY: u8 = 1;

/// 最低优先级
pub const LOWEST_PRIORITY: u8 = 5;

/// 单个地点盈亏绝对值上限（KL/hr）
pub const MAX_BALANCE: i64 = 1_000_000_000_000;

/// 单条管道容量上限（KL/hr）
pub const MAX_CAPACITY: i64 = 1_000_000_000_000;

/// 管道单位成本上限（$/KL）
pub const MAX_PIPE_COST: i64 = 1_000_000_000;

/// 土壤类型
///
/// 对流量算法不透明，只供作物建议报告使用。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    Clay,
    Loam,
    Sand,
    /// 非农业区
    None,
    Other(String),
}

impl SoilType {
    /// 是否为农业用地
    pub fn is_farmland(&self) -> bool {
        !matches!(self, SoilType::None)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SoilType::Clay => "Clay",
            SoilType::Loam => "Loam",
            SoilType::Sand => "Sand",
            SoilType::None => "None",
            SoilType::Other(s) => s,
        }
    }
}

impl From<&str> for SoilType {
    fn from(s: &str) -> Self {
        match s {
            "Clay" => SoilType::Clay,
            "Loam" => SoilType::Loam,
            "Sand" => SoilType::Sand,
            "None" => SoilType::None,
            other => SoilType::Other(other.to_string()),
        }
    }
}

impl FromStr for SoilType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SoilType::from(s))
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 地点（城市或地区）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    /// 正数为盈余（KL/hr），负数为缺口，零为中转
    pub balance: i64,
    /// 1（最高）到 5（最低），只对缺水地点有意义
    pub priority: u8,
    pub soil: SoilType,
}

impl Place {
    pub fn new(
        id: PlaceId,
        name: impl Into<String>,
        balance: i64,
        priority: u8,
        soil: SoilType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            priority,
            soil,
        }
    }

    pub fn is_surplus(&self) -> bool {
        self.balance > 0
    }

    pub fn is_deficit(&self) -> bool {
        self.balance < 0
    }

    /// 缺水量（非缺水地点为 0）
    pub fn demand(&self) -> i64 {
        if self.is_deficit() {
            self.balance.saturating_neg()
        } else {
            0
        }
    }

    /// 可供水量（非盈余地点为 0）
    pub fn supply(&self) -> i64 {
        self.balance.max(0)
    }
}

/// 管道连接
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from: PlaceId,
    pub to: PlaceId,
    /// 最大容量（KL/hr）
    pub capacity: i64,
    /// 单位流量成本（$/KL）
    pub cost: i64,
}

impl Connection {
    pub fn new(from: PlaceId, to: PlaceId, capacity: i64, cost: i64) -> Self {
        Self {
            from,
            to,
            capacity,
            cost,
        }
    }
}
