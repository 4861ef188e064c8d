//! 管道瓶颈报告

use crate::graph::FlowNetwork;
use crate::types::{Place, PlaceId};
use serde::Serialize;

/// 满载运行的管道
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bottleneck {
    pub from: PlaceId,
    pub from_name: String,
    pub to: PlaceId,
    pub to_name: String,
    pub flow: i64,
    pub capacity: i64,
}

/// 找出流量达到容量上限的真实管道
///
/// 只考虑真实地点之间 `cost >= 0` 的正向边，超级源点和超级汇点的边不计入。
pub fn find_bottlenecks(network: &FlowNetwork, places: &[Place]) -> Vec<Bottleneck> {
    let mut bottlenecks = Vec::new();

    for place in places {
        for edge in network.graph.edges(place.id) {
            if network.is_virtual(edge.target) || !edge.is_pipe() || !edge.is_saturated() {
                continue;
            }
            bottlenecks.push(Bottleneck {
                from: place.id,
                from_name: place.name.clone(),
                to: edge.target,
                to_name: places[edge.target].name.clone(),
                flow: edge.flow,
                capacity: edge.capacity,
            });
        }
    }

    bottlenecks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::min_cost_max_flow;
    use crate::graph::NetworkBuilder;
    use crate::types::{Connection, SoilType};

    fn run(places: &[Place], connections: &[Connection]) -> FlowNetwork {
        let mut net = NetworkBuilder::new(1000).build(places, connections);
        let (s, t) = (net.source, net.sink);
        min_cost_max_flow(&mut net.graph, s, t);
        net
    }

    #[test]
    fn test_saturated_pipe_reported() {
        let places = vec![
            Place::new(0, "Dam", 20, 3, SoilType::None),
            Place::new(1, "Hub", 0, 3, SoilType::None),
            Place::new(2, "Farm", -12, 1, SoilType::Loam),
        ];
        let connections = vec![Connection::new(0, 1, 5, 0), Connection::new(1, 2, 20, 0)];
        let net = run(&places, &connections);

        let found = find_bottlenecks(&net, &places);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].from, found[0].to), (0, 1));
        assert_eq!((found[0].flow, found[0].capacity), (5, 5));
        assert_eq!(found[0].from_name, "Dam");
        assert_eq!(found[0].to_name, "Hub");
    }

    #[test]
    fn test_under_utilized_network() {
        let places = vec![
            Place::new(0, "Dam", 3, 3, SoilType::None),
            Place::new(1, "Farm", -3, 1, SoilType::Loam),
        ];
        let connections = vec![Connection::new(0, 1, 10, 2)];
        let net = run(&places, &connections);

        // 汇点边虽已满载，但不是真实管道
        assert!(find_bottlenecks(&net, &places).is_empty());
    }

    #[test]
    fn test_zero_capacity_pipe_ignored() {
        let places = vec![
            Place::new(0, "Dam", 3, 3, SoilType::None),
            Place::new(1, "Farm", -3, 1, SoilType::Loam),
        ];
        let connections = vec![Connection::new(0, 1, 0, 2)];
        let net = run(&places, &connections);
        assert!(find_bottlenecks(&net, &places).is_empty());
    }
}
