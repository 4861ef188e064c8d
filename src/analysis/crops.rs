//! 作物建议
//!
//! 根据缺水农业地点实际获得的水量和土壤类型推荐作物

use crate::graph::FlowNetwork;
use crate::types::{Place, PlaceId, SoilType};
use serde::Serialize;

/// 作物需水档案
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropProfile {
    pub name: &'static str,
    /// 1（低）到 5（高）
    pub water_requirement: u8,
    pub ideal_soil: SoilType,
}

/// 固定的作物查找表
pub const CROP_DATA: &[CropProfile] = &[
    CropProfile {
        name: "Sorghum (Low Water)",
        water_requirement: 1,
        ideal_soil: SoilType::Sand,
    },
    CropProfile {
        name: "Cotton (Low/Medium Water)",
        water_requirement: 2,
        ideal_soil: SoilType::Sand,
    },
    CropProfile {
        name: "Wheat (Medium Water)",
        water_requirement: 3,
        ideal_soil: SoilType::Loam,
    },
    CropProfile {
        name: "Corn (Medium Water)",
        water_requirement: 3,
        ideal_soil: SoilType::Loam,
    },
    CropProfile {
        name: "Rice (High Water)",
        water_requirement: 5,
        ideal_soil: SoilType::Clay,
    },
    CropProfile {
        name: "Sugarcane (High Water)",
        water_requirement: 4,
        ideal_soil: SoilType::Loam,
    },
];

/// 匹配程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CropMatch {
    /// 水量充足且土壤理想
    HighMatch,
    /// 水量充足但土壤不匹配
    SoilMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropSuggestion {
    pub crop: &'static str,
    pub level: CropMatch,
}

/// 单个地点的作物建议
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropReport {
    pub place: PlaceId,
    pub name: String,
    pub soil: SoilType,
    pub received: i64,
    pub required: i64,
    pub fulfillment: f64,
    /// 1（少）到 5（多）
    pub water_score: u8,
    pub suggestions: Vec<CropSuggestion>,
}

/// 满足率对应的水量评分
pub fn water_score(fulfillment: f64) -> u8 {
    if fulfillment >= 0.9 {
        5
    } else if fulfillment >= 0.6 {
        4
    } else if fulfillment >= 0.4 {
        3
    } else if fulfillment >= 0.2 {
        2
    } else {
        1
    }
}

/// 流入地点的实际水量：所有指向该地点、`cost >= 0` 且流量为正的边之和
fn received_water(network: &FlowNetwork, place: PlaceId) -> i64 {
    network
        .graph
        .iter_edges()
        .filter(|(_, _, e)| e.target == place && e.flow > 0 && e.is_pipe())
        .map(|(_, _, e)| e.flow)
        .sum()
}

/// 为缺水农业地点生成作物建议，其余地点返回 `None`
pub fn suggest_crops(network: &FlowNetwork, place: &Place) -> Option<CropReport> {
    if !place.soil.is_farmland() || !place.is_deficit() {
        return None;
    }

    let received = received_water(network, place.id);
    let required = place.demand();
    let fulfillment = received as f64 / required as f64;
    let score = water_score(fulfillment);

    let suggestions = CROP_DATA
        .iter()
        .filter(|crop| score >= crop.water_requirement)
        .map(|crop| CropSuggestion {
            crop: crop.name,
            level: if crop.ideal_soil == place.soil {
                CropMatch::HighMatch
            } else {
                CropMatch::SoilMismatch
            },
        })
        .collect();

    Some(CropReport {
        place: place.id,
        name: place.name.clone(),
        soil: place.soil.clone(),
        received,
        required,
        fulfillment,
        water_score: score,
        suggestions,
    })
}
