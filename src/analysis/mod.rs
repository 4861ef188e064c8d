//! 水资源分配分析
//!
//! 每次分析都重新构建流网络并运行最小费用最大流，结果只在本次分析
//! （及其后续查询）期间有效。

mod bottleneck;
mod crops;

pub use bottleneck::{find_bottlenecks, Bottleneck};
pub use crops::{suggest_crops, CropMatch, CropProfile, CropReport, CropSuggestion, CROP_DATA};

use crate::algorithm::{MinCostFlow, SinglePathTransfer, SuccessiveShortestPaths, TransferTracer};
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::graph::{FlowNetwork, NetworkBuilder};
use crate::import::Dataset;
use crate::types::{Place, PlaceId};
use serde::Serialize;

/// 分析汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    /// 总需水量
    pub total_required: i64,
    /// 总可供水量
    pub total_available: i64,
    /// 实际分配的水量
    pub max_flow: i64,
    /// 最小分配成本（含优先级惩罚）
    pub min_cost: i64,
    /// 未满足的需水量
    pub unmet_demand: i64,
    /// 增广次数
    pub augmentations: usize,
}

/// 单个地点的分配情况
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceAllocation {
    pub id: PlaceId,
    pub name: String,
    pub balance: i64,
    pub priority: u8,
    /// 缺水地点为获得的水量，盈余地点为供出的水量
    pub allocated: i64,
    /// 缺水地点的满足率，其他地点为 `None`
    pub fulfillment: Option<f64>,
}

/// 一次分析的结果
#[derive(Debug, Clone)]
pub struct Analysis {
    places: Vec<Place>,
    network: FlowNetwork,
    flow: MinCostFlow,
}

/// 运行分配分析
///
/// 没有地点时返回 [`Error::NothingToAnalyze`]，数值可能溢出时返回
/// [`Error::Overflow`]，两种情况都不会构建网络。
pub fn run_analysis(dataset: &Dataset, config: &AnalysisConfig) -> Result<Analysis> {
    if dataset.places().is_empty() {
        return Err(Error::NothingToAnalyze);
    }

    let builder = NetworkBuilder::new(config.priority_penalty);
    builder.check_bounds(dataset.places(), dataset.connections())?;

    let mut network = builder.build(dataset.places(), dataset.connections());
    let (source, sink) = (network.source, network.sink);
    let flow = SuccessiveShortestPaths::new(&mut network.graph).run(source, sink);

    tracing::info!(
        required = network.total_demand,
        available = network.total_supply,
        distributed = flow.max_flow,
        cost = flow.min_cost,
        "分配分析完成"
    );

    Ok(Analysis {
        places: dataset.places().to_vec(),
        network,
        flow,
    })
}

impl Analysis {
    /// 参与分析的地点
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// 最终流网络（只读）
    pub fn network(&self) -> &FlowNetwork {
        &self.network
    }

    /// 最小费用最大流结果
    pub fn flow(&self) -> MinCostFlow {
        self.flow
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_required: self.network.total_demand,
            total_available: self.network.total_supply,
            max_flow: self.flow.max_flow,
            min_cost: self.flow.min_cost,
            unmet_demand: self.network.total_demand - self.flow.max_flow,
            augmentations: self.flow.augmentations,
        }
    }

    /// 各地点的分配情况
    pub fn allocations(&self) -> Vec<PlaceAllocation> {
        self.places
            .iter()
            .map(|p| {
                let (allocated, fulfillment) = if p.is_deficit() {
                    let delivered = self.network.delivered_to(p.id);
                    (delivered, Some(delivered as f64 / p.demand() as f64))
                } else {
                    (self.network.supplied_by(p.id), None)
                };
                PlaceAllocation {
                    id: p.id,
                    name: p.name.clone(),
                    balance: p.balance,
                    priority: p.priority,
                    allocated,
                    fulfillment,
                }
            })
            .collect()
    }

    /// 查找两地之间的一条输水路径（部分视图）
    pub fn trace_transfer(
        &self,
        from: PlaceId,
        to: PlaceId,
    ) -> Result<Option<SinglePathTransfer>> {
        TransferTracer::new(&self.network.graph, &self.places).trace(from, to)
    }

    /// 满载管道
    pub fn bottlenecks(&self) -> Vec<Bottleneck> {
        find_bottlenecks(&self.network, &self.places)
    }

    /// 所有农业缺水地点的作物建议
    pub fn crop_reports(&self) -> Vec<CropReport> {
        self.places
            .iter()
            .filter_map(|p| suggest_crops(&self.network, p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Connection, SoilType};

    fn dataset() -> Dataset {
        Dataset::from_parts(
            vec![
                Place::new(0, "A", 10, 3, SoilType::None),
                Place::new(1, "B", -8, 1, SoilType::Loam),
                Place::new(2, "C", -5, 5, SoilType::Clay),
            ],
            vec![Connection::new(0, 1, 10, 1), Connection::new(0, 2, 10, 1)],
        )
    }

    #[test]
    fn test_summary() {
        let analysis = run_analysis(&dataset(), &AnalysisConfig::default()).unwrap();
        let summary = analysis.summary();

        assert_eq!(summary.total_required, 13);
        assert_eq!(summary.total_available, 10);
        assert_eq!(summary.max_flow, 10);
        assert_eq!(summary.min_cost, 8010);
        assert_eq!(summary.unmet_demand, 3);
        assert_eq!(summary.augmentations, 2);
    }

    #[test]
    fn test_penalty_from_config() {
        let config = AnalysisConfig::default().with_priority_penalty(1);
        let analysis = run_analysis(&dataset(), &config).unwrap();
        // 8 × 1 + 2 × (1 + 4)
        assert_eq!(analysis.summary().min_cost, 18);
    }

    #[test]
    fn test_allocations() {
        let analysis = run_analysis(&dataset(), &AnalysisConfig::default()).unwrap();
        let allocations = analysis.allocations();

        assert_eq!(allocations[0].allocated, 10);
        assert_eq!(allocations[0].fulfillment, None);
        assert_eq!(allocations[1].allocated, 8);
        assert_eq!(allocations[1].fulfillment, Some(1.0));
        assert_eq!(allocations[2].allocated, 2);
        assert_eq!(allocations[2].fulfillment, Some(0.4));
    }

    #[test]
    fn test_empty_dataset() {
        let empty = Dataset::from_parts(Vec::new(), Vec::new());
        let result = run_analysis(&empty, &AnalysisConfig::default());
        assert!(matches!(result, Err(Error::NothingToAnalyze)));
    }

    #[test]
    fn test_overflowing_inputs_rejected() {
        let config = AnalysisConfig::default().with_priority_penalty(i64::MAX);
        let result = run_analysis(&dataset(), &config);
        assert!(matches!(result, Err(Error::Overflow(_))));

        let abyss = Dataset::from_parts(
            vec![
                Place::new(0, "A", 10, 3, SoilType::None),
                Place::new(1, "B", i64::MIN, 1, SoilType::Loam),
            ],
            vec![Connection::new(0, 1, 10, 1)],
        );
        let result = run_analysis(&abyss, &AnalysisConfig::default());
        assert!(matches!(result, Err(Error::Overflow(_))));

        let pricey = Dataset::from_parts(
            vec![
                Place::new(0, "A", 10, 3, SoilType::None),
                Place::new(1, "Hub", 0, 3, SoilType::None),
                Place::new(2, "B", -10, 1, SoilType::Loam),
            ],
            vec![
                Connection::new(0, 1, 10, 5_000_000_000_000_000_000),
                Connection::new(1, 2, 10, 5_000_000_000_000_000_000),
            ],
        );
        let result = run_analysis(&pricey, &AnalysisConfig::default());
        assert!(matches!(result, Err(Error::Overflow(_))));
    }

    #[test]
    fn test_post_analysis_queries() {
        let analysis = run_analysis(&dataset(), &AnalysisConfig::default()).unwrap();

        let path = analysis.trace_transfer(0, 2).unwrap().unwrap();
        assert_eq!(path.places, vec![0, 2]);
        assert_eq!(path.flow, 2);

        assert_eq!(analysis.crop_reports().len(), 2);
        assert!(analysis.bottlenecks().is_empty());
    }
}
