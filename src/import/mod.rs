//! 数据导入模块
//!
//! 读取分为 `[PLACES]` 与 `[CONNECTIONS]` 两段的文本文件：
//!
//! ```text
//! # 名称 盈亏 优先级 土壤
//! [PLACES]
//! Reservoir 120 3 None
//! Greenfield -40 1 Loam
//! [CONNECTIONS]
//! # 起点 终点 容量 成本
//! 0 1 60 4
//! ```
//!
//! 空行与 `#` 开头的行被跳过；格式错误或无效的记录记录警告后跳过。

use crate::error::Result;
use crate::types::{
    Connection, Place, PlaceId, SoilType, HIGHEST_PRIORITY, LOWEST_PRIORITY, MAX_BALANCE,
    MAX_CAPACITY, MAX_PIPE_COST,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// 导入统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub places: usize,
    pub connections: usize,
    pub skipped: usize,
}

/// 当前所在的段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    Outside,
    Places,
    Connections,
}

/// 加载后的地点与管道数据
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    places: Vec<Place>,
    connections: Vec<Connection>,
    #[serde(skip)]
    names: IndexMap<String, PlaceId>,
}

impl Dataset {
    /// 由已校验的地点和管道构造
    pub fn from_parts(places: Vec<Place>, connections: Vec<Connection>) -> Self {
        let mut names = IndexMap::with_capacity(places.len());
        for p in &places {
            names.entry(p.name.clone()).or_insert(p.id);
        }
        Self {
            places,
            connections,
            names,
        }
    }

    /// 从文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, ImportStats)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        tracing::info!(path = %path.display(), "加载数据");
        Self::from_reader(BufReader::new(file))
    }

    /// 从文本解析
    pub fn parse(text: &str) -> (Self, ImportStats) {
        let mut loader = Loader::default();
        for line in text.lines() {
            loader.feed(line);
        }
        loader.finish()
    }

    fn from_reader<R: BufRead>(reader: R) -> Result<(Self, ImportStats)> {
        let mut loader = Loader::default();
        for line in reader.lines() {
            loader.feed(&line?);
        }
        Ok(loader.finish())
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// 按数字 ID 或名称查找地点
    pub fn resolve(&self, key: &str) -> Option<PlaceId> {
        if let Ok(id) = key.parse::<PlaceId>() {
            return (id < self.places.len()).then_some(id);
        }
        self.names.get(key).copied()
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(id)
    }
}

/// 逐行解析状态
#[derive(Default)]
struct Loader {
    section: Section,
    places: Vec<Place>,
    connections: Vec<Connection>,
    stats: ImportStats,
}

impl Loader {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if line.starts_with("[PLACES]") {
            self.section = Section::Places;
            return;
        }
        if line.starts_with("[CONNECTIONS]") {
            self.section = Section::Connections;
            return;
        }

        let parsed = match self.section {
            Section::Places => self.parse_place(line).map(|p| self.places.push(p)),
            Section::Connections => self
                .parse_connection(line)
                .map(|c| self.connections.push(c)),
            Section::Outside => Err("记录不在任何段内".to_string()),
        };

        if let Err(reason) = parsed {
            tracing::warn!(line, reason = %reason, "跳过无效记录");
            self.stats.skipped += 1;
        }
    }

    fn parse_place(&self, line: &str) -> std::result::Result<Place, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [name, balance, priority, soil, ..] = fields.as_slice() else {
            return Err("地点记录需要 4 个字段".to_string());
        };

        let balance: i64 = balance
            .parse()
            .map_err(|_| format!("无效的盈亏值: {}", balance))?;
        if !(-MAX_BALANCE..=MAX_BALANCE).contains(&balance) {
            return Err(format!("盈亏值 {} 超出范围 ±{}", balance, MAX_BALANCE));
        }
        let priority: u8 = priority
            .parse()
            .map_err(|_| format!("无效的优先级: {}", priority))?;
        if !(HIGHEST_PRIORITY..=LOWEST_PRIORITY).contains(&priority) {
            return Err(format!(
                "优先级 {} 超出范围 {}..={}",
                priority, HIGHEST_PRIORITY, LOWEST_PRIORITY
            ));
        }
        Ok(Place::new(
            self.places.len(),
            *name,
            balance,
            priority,
            SoilType::from(*soil),
        ))
    }

    fn parse_connection(&self, line: &str) -> std::result::Result<Connection, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [from, to, capacity, cost, ..] = fields.as_slice() else {
            return Err("管道记录需要 4 个字段".to_string());
        };

        let parse = |s: &str| s.parse::<i64>().map_err(|_| format!("无效的数值: {}", s));
        let (from, to) = (parse(*from)?, parse(*to)?);
        let (capacity, cost) = (parse(*capacity)?, parse(*cost)?);

        let count = self.places.len() as i64;
        if from < 0 || to < 0 || from >= count || to >= count {
            return Err(format!("地点 ID 必须在 0..{} 范围内", count));
        }
        if capacity < 0 {
            return Err(format!("容量不能为负: {}", capacity));
        }
        if capacity > MAX_CAPACITY {
            return Err(format!("容量 {} 超出上限 {}", capacity, MAX_CAPACITY));
        }
        if cost < 0 {
            return Err(format!("管道成本不能为负: {}", cost));
        }
        if cost > MAX_PIPE_COST {
            return Err(format!("管道成本 {} 超出上限 {}", cost, MAX_PIPE_COST));
        }

        Ok(Connection::new(from as PlaceId, to as PlaceId, capacity, cost))
    }

    fn finish(self) -> (Dataset, ImportStats) {
        let mut stats = self.stats;
        stats.places = self.places.len();
        stats.connections = self.connections.len();

        tracing::info!(
            places = stats.places,
            connections = stats.connections,
            skipped = stats.skipped,
            "数据加载完成"
        );

        (Dataset::from_parts(self.places, self.connections), stats)
    }
}
