//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("没有可分析的数据：请先加载地点和管道")]
    NothingToAnalyze,

    #[error("尚未运行分配分析")]
    NoAnalysis,

    #[error("无效的地点 ID: {0}")]
    InvalidPlace(String),

    #[error("地点 {0} 不是盈余水源")]
    NotSurplus(String),

    #[error("地点 {0} 不是缺水地点")]
    NotDeficit(String),

    #[error("数值超出可计算范围: {0}")]
    Overflow(String),

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
