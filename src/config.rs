//! 分析配置

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认优先级惩罚权重
pub const DEFAULT_PRIORITY_PENALTY: i64 = 1000;

/// 优先级惩罚权重上限
pub const MAX_PRIORITY_PENALTY: i64 = 1_000_000_000;

/// 默认数据文件
pub const DEFAULT_DATA_FILE: &str = "./water_data.txt";

/// 分析配置
///
/// 由调用方持有并显式传入，不同配置的分析可以互不干扰地并存。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 每降低一级优先级，汇点边单位成本增加的数额
    pub priority_penalty: i64,
    /// 数据文件路径
    pub data_file: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            priority_penalty: DEFAULT_PRIORITY_PENALTY,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置优先级惩罚权重
    pub fn with_priority_penalty(mut self, penalty: i64) -> Self {
        self.priority_penalty = penalty;
        self
    }

    /// 设置数据文件
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let config = AnalysisConfig::default();
        assert_eq!(config.priority_penalty, 1000);
        assert_eq!(config.data_file, PathBuf::from("./water_data.txt"));

        let config = AnalysisConfig::new()
            .with_priority_penalty(50)
            .with_data_file("/tmp/net.txt");
        assert_eq!(config.priority_penalty, 50);
        assert_eq!(config.data_file, PathBuf::from("/tmp/net.txt"));
    }
}
