//! 结果打印器
//!
//! 以表格形式输出数据和分析结果

use crate::algorithm::SinglePathTransfer;
use crate::analysis::{AnalysisSummary, Bottleneck, CropMatch, CropReport, PlaceAllocation};
use crate::types::{Connection, Place};
use colored::Colorize;
use prettytable::{format, row, Cell, Row, Table};

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(titles.iter().map(|t| Cell::new(t)).collect()));
    table
}

fn heading(title: &str) -> String {
    format!("\n{}\n", title.bold().cyan())
}

/// 地点与管道数据
pub fn format_dataset(places: &[Place], connections: &[Connection]) -> String {
    let mut table = new_table(&["ID", "名称", "盈亏", "优先级", "土壤"]);
    for p in places {
        table.add_row(row![r->p.id, p.name, r->p.balance, r->p.priority, p.soil]);
    }

    let mut pipes = new_table(&["起点", "终点", "容量", "成本"]);
    for c in connections {
        pipes.add_row(row![r->c.from, r->c.to, r->c.capacity, r->c.cost]);
    }

    format!(
        "{}{}{}{}",
        heading("地点数据"),
        table,
        heading("管道数据"),
        pipes
    )
}

/// 分析汇总
pub fn format_summary(summary: &AnalysisSummary) -> String {
    let mut table = new_table(&["指标", "数值"]);
    table.add_row(row!["总需水量", r->format!("{} KL", summary.total_required)]);
    table.add_row(row!["总可供水量", r->format!("{} KL", summary.total_available)]);
    table.add_row(row!["实际分配水量", r->format!("{} KL", summary.max_flow)]);
    table.add_row(row!["未满足需水量", r->format!("{} KL", summary.unmet_demand)]);
    table.add_row(row!["最小分配成本", r->format!("${}", summary.min_cost)]);
    table.add_row(row!["增广次数", r->summary.augmentations]);

    format!(
        "{}{}（成本包含优先级惩罚）\n",
        heading("水资源分配分析 (MCMF)"),
        table
    )
}

/// 各地点分配情况
pub fn format_allocations(allocations: &[PlaceAllocation]) -> String {
    let mut table = new_table(&["ID", "名称", "盈亏", "优先级", "分配量", "满足率"]);
    for a in allocations {
        let fulfillment = a
            .fulfillment
            .map(|f| format!("{:.1}%", f * 100.0))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(row![
            r->a.id,
            a.name,
            r->a.balance,
            r->a.priority,
            r->a.allocated,
            r->fulfillment
        ]);
    }
    format!("{}{}", heading("地点分配"), table)
}

/// 管道瓶颈报告
pub fn format_bottlenecks(bottlenecks: &[Bottleneck]) -> String {
    if bottlenecks.is_empty() {
        return format!("{}未发现满载管道，管网尚有余量。\n", heading("管网瓶颈报告"));
    }

    let mut table = new_table(&["管道", "流量 / 容量 (KL/hr)"]);
    for b in bottlenecks {
        table.add_row(row![
            format!("{} ({}) -> {} ({})", b.from_name, b.from, b.to_name, b.to),
            r->format!("{} / {}", b.flow, b.capacity)
        ]);
    }
    format!("{}{}", heading("管网瓶颈报告"), table)
}

/// 单条路径追踪结果
pub fn format_transfer(
    from: &Place,
    to: &Place,
    transfer: Option<&SinglePathTransfer>,
    places: &[Place],
) -> String {
    match transfer {
        Some(t) => {
            let route: Vec<&str> = t
                .places
                .iter()
                .filter_map(|&id| places.get(id).map(|p| p.name.as_str()))
                .collect();
            format!(
                "{}{} -> {}\n  路径: {}\n  路径流量: {} KL（仅为其中一条路径的瓶颈流量）\n  路径成本: ${}\n",
                heading("输水路径分析"),
                from.name,
                to.name,
                route.join(" -> "),
                t.flow,
                t.cost
            )
        }
        None => format!(
            "最终方案中 {} 与 {} 之间没有正流量的直接路径。\n",
            from.name, to.name
        ),
    }
}

/// 作物建议
pub fn format_crop_reports(reports: &[CropReport]) -> String {
    if reports.is_empty() {
        return "没有需要作物建议的缺水农业地点。\n".to_string();
    }

    let mut output = String::new();
    for r in reports {
        output.push_str(&heading(&format!("{} 的作物建议", r.name)));
        output.push_str(&format!("  土壤类型: {}\n", r.soil));
        output.push_str(&format!(
            "  用水情况: 获得 {} KL / 需要 {} KL ({:.1}%)\n",
            r.received,
            r.required,
            r.fulfillment * 100.0
        ));
        output.push_str(&format!("  推荐（水量评分 {}）:\n", r.water_score));

        if r.suggestions.is_empty() {
            output.push_str("    - 没有与当前水量和土壤匹配的作物\n");
        }
        for s in &r.suggestions {
            let line = match s.level {
                CropMatch::HighMatch => format!("    - {}（高度匹配：土壤与水量理想）", s.crop)
                    .green()
                    .to_string(),
                CropMatch::SoilMismatch => format!("    - {}（良好：水量充足，土壤不匹配）", s.crop),
            };
            output.push_str(&line);
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SoilType;

    #[test]
    fn test_format_dataset() {
        let places = vec![Place::new(0, "Reservoir", 120, 3, SoilType::None)];
        let connections = vec![Connection::new(0, 0, 5, 1)];
        let output = format_dataset(&places, &connections);
        assert!(output.contains("Reservoir"));
        assert!(output.contains("120"));
    }

    #[test]
    fn test_format_empty_bottlenecks() {
        let output = format_bottlenecks(&[]);
        assert!(output.contains("未发现满载管道"));
    }

    #[test]
    fn test_format_summary() {
        let summary = AnalysisSummary {
            total_required: 13,
            total_available: 10,
            max_flow: 10,
            min_cost: 8010,
            unmet_demand: 3,
            augmentations: 2,
        };
        let output = format_summary(&summary);
        assert!(output.contains("$8010"));
        assert!(output.contains("13 KL"));
    }

    #[test]
    fn test_format_missing_transfer() {
        let a = Place::new(0, "Dam", 5, 3, SoilType::None);
        let b = Place::new(1, "Farm", -5, 1, SoilType::Loam);
        let output = format_transfer(&a, &b, None, &[]);
        assert!(output.contains("没有正流量"));
    }
}
