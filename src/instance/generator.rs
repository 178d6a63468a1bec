//! Synthetic interface population with controlled defects.
//!
//! The generator exists to feed the consistency checks: it manufactures
//! interfaces whose addressing deliberately violates the rules at
//! configurable rates, so the analyzer has something real to find.

use super::subnet::{format_address, Subnet};
use crate::graph::ns::{vocab, INST};
use crate::graph::{Graph, Literal, Triple, Uri};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// All generated subnets are carved out of this range.
const CORE_NETWORK: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 0);
const CORE_PREFIX: u8 = 8;

/// Freshly drawn subnets use a prefix in this range; overlap defects carve
/// strictly narrower blocks, capped at /30 so a host address always fits.
const MIN_PREFIX: u8 = 16;
const MAX_PREFIX: u8 = 28;
const NARROWEST_PREFIX: u8 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of interfaces to produce.
    pub count: usize,
    /// Probability that an enabled interface is left without any address.
    pub inconsistency_rate: f64,
    /// Probability that a new subnet is carved inside a previously used
    /// one, guaranteeing an overlap.
    pub overlap_rate: f64,
    /// Seed for reproducible runs; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 20,
            inconsistency_rate: 0.15,
            overlap_rate: 0.10,
            seed: None,
        }
    }
}

/// What one generation run produced.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub interfaces: usize,
    pub ipv4_addresses: usize,
    pub ipv6_addresses: usize,
    pub missing_address_defects: usize,
    pub overlap_defects: usize,
}

pub struct InstanceGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    used_subnets: Vec<Subnet>,
}

impl InstanceGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            used_subnets: Vec::new(),
        }
    }

    /// Populate the graph with `count` interfaces and their addresses.
    pub fn generate(mut self, graph: &mut Graph) -> GenerationSummary {
        let mut summary = GenerationSummary::default();
        for index in 0..self.config.count {
            let name = format!("eth{index}");
            self.generate_interface(graph, &name, index, &mut summary);
        }
        tracing::info!(
            interfaces = summary.interfaces,
            ipv4 = summary.ipv4_addresses,
            ipv6 = summary.ipv6_addresses,
            missing_address_defects = summary.missing_address_defects,
            overlap_defects = summary.overlap_defects,
            "generated instance data"
        );
        summary
    }

    fn generate_interface(
        &mut self,
        graph: &mut Graph,
        name: &str,
        index: usize,
        summary: &mut GenerationSummary,
    ) {
        let iface = INST.uri(name);
        let enabled = self.rng.gen_bool(0.75);
        let oper_status = if self.rng.gen_bool(0.5) { "up" } else { "down" };

        graph.insert(Triple::new(
            iface.clone(),
            vocab::TYPE.clone(),
            vocab::INTERFACE_CLASS.clone(),
        ));
        graph.insert(Triple::new(iface.clone(), vocab::IF_NAME.clone(), Literal::from(name)));
        graph.insert(Triple::new(
            iface.clone(),
            vocab::IF_ENABLED.clone(),
            Literal::from(enabled),
        ));
        graph.insert(Triple::new(
            iface.clone(),
            vocab::IF_OPER_STATUS.clone(),
            Literal::from(oper_status),
        ));
        summary.interfaces += 1;

        // The defect means no address at all: neither family is assigned,
        // so the interface is certain to trip the missing-address check.
        let drop_address = enabled && self.rng.gen_bool(self.config.inconsistency_rate);
        if drop_address {
            summary.missing_address_defects += 1;
            return;
        }

        self.generate_ipv4(graph, name, &iface, summary);
        if self.rng.gen_bool(0.5) {
            self.generate_ipv6(graph, name, &iface, index);
            summary.ipv6_addresses += 1;
        }
    }

    fn generate_ipv4(
        &mut self,
        graph: &mut Graph,
        name: &str,
        iface: &Uri,
        summary: &mut GenerationSummary,
    ) {
        let subnet = self.pick_subnet(summary);
        let host = self.host_in(&subnet);

        let addr = INST.uri(&format!("{name}_ipv4"));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::TYPE.clone(),
            vocab::IPV4_CLASS.clone(),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_ADDR.clone(),
            Literal::from(format_address(host)),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_PREFIX_LENGTH.clone(),
            Literal::from(subnet.prefix()),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_CIDR.clone(),
            Literal::from(subnet.cidr()),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_NETWORK_START.clone(),
            Literal::from(subnet.start()),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_NETWORK_END.clone(),
            Literal::from(subnet.end()),
        ));
        graph.insert(Triple::new(addr, vocab::IP_INTERFACE.clone(), iface.clone()));

        self.used_subnets.push(subnet);
        summary.ipv4_addresses += 1;
    }

    fn generate_ipv6(&mut self, graph: &mut Graph, name: &str, iface: &Uri, index: usize) {
        let addr = INST.uri(&format!("{name}_ipv6"));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::TYPE.clone(),
            vocab::IPV6_CLASS.clone(),
        ));
        graph.insert(Triple::new(
            addr.clone(),
            vocab::IP_ADDR.clone(),
            Literal::from(format!("fe80::{:x}", index + 1)),
        ));
        graph.insert(Triple::new(addr, vocab::IP_INTERFACE.clone(), iface.clone()));
    }

    /// Draw the next subnet: either carved inside a previously used one
    /// (a guaranteed overlap) or fresh from the core range.
    fn pick_subnet(&mut self, summary: &mut GenerationSummary) -> Subnet {
        let carve = !self.used_subnets.is_empty()
            && self.rng.gen_bool(self.config.overlap_rate);
        if carve {
            let parent = self.used_subnets[self.rng.gen_range(0..self.used_subnets.len())];
            summary.overlap_defects += 1;
            self.carve_inside(parent)
        } else {
            self.fresh_subnet()
        }
    }

    fn fresh_subnet(&mut self) -> Subnet {
        let core = Subnet::new(u32::from(CORE_NETWORK), CORE_PREFIX);
        let prefix = self.rng.gen_range(MIN_PREFIX..=MAX_PREFIX);
        let block_count = 1u64 << (prefix - CORE_PREFIX);
        let block = self.rng.gen_range(0..block_count);
        let offset = (block as u32) << (32 - u32::from(prefix));
        Subnet::new(core.start() + offset, prefix)
    }

    /// A strictly narrower subnet inside `parent`: same range family,
    /// never identical bounds, so it overlaps without duplicating.
    fn carve_inside(&mut self, parent: Subnet) -> Subnet {
        let prefix = self
            .rng
            .gen_range(parent.prefix() + 1..=NARROWEST_PREFIX.max(parent.prefix() + 1));
        let span = parent.size() as u32;
        let offset = self.rng.gen_range(0..span);
        Subnet::new(parent.start() + offset, prefix)
    }

    /// A host address inside the subnet, avoiding network and broadcast.
    fn host_in(&mut self, subnet: &Subnet) -> u32 {
        let size = subnet.size();
        if size <= 2 {
            subnet.start()
        } else {
            subnet.start() + self.rng.gen_range(1..(size as u32 - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ConsistencyChecker;

    fn run(config: GeneratorConfig) -> (Graph, GenerationSummary) {
        let mut graph = Graph::new();
        let summary = InstanceGenerator::new(config).generate(&mut graph);
        (graph, summary)
    }

    #[test]
    fn produces_the_requested_population() {
        let (graph, summary) = run(GeneratorConfig {
            count: 10,
            inconsistency_rate: 0.0,
            overlap_rate: 0.0,
            seed: Some(7),
        });
        assert_eq!(summary.interfaces, 10);
        assert_eq!(summary.ipv4_addresses, 10);
        assert_eq!(graph.subjects_of_type(&vocab::INTERFACE_CLASS).count(), 10);
    }

    #[test]
    fn full_inconsistency_rate_strips_every_enabled_interface() {
        let (graph, summary) = run(GeneratorConfig {
            count: 100,
            inconsistency_rate: 1.0,
            overlap_rate: 0.0,
            seed: Some(11),
        });
        let checker = ConsistencyChecker::new(&graph);
        let missing = checker.find_missing_addresses();
        assert_eq!(missing.len(), summary.missing_address_defects);
        // Exactly the enabled interfaces are reported.
        for uri in graph.subjects_of_type(&vocab::INTERFACE_CLASS) {
            let enabled = graph
                .object(uri, &vocab::IF_ENABLED)
                .and_then(|t| t.as_literal())
                .and_then(Literal::as_bool)
                .unwrap();
            let reported = missing.iter().any(|m| &m.interface == uri);
            assert_eq!(enabled, reported, "interface {uri}");
        }
    }

    #[test]
    fn full_overlap_rate_guarantees_overlapping_pairs() {
        let (graph, summary) = run(GeneratorConfig {
            count: 30,
            inconsistency_rate: 0.0,
            overlap_rate: 1.0,
            seed: Some(3),
        });
        assert!(summary.ipv4_addresses >= 2);
        // A carved subnet is strictly narrower than its parent, so it can
        // never be the parent's exact duplicate; an overlapping pair must
        // survive the duplicate exclusion.
        let checker = ConsistencyChecker::new(&graph);
        assert!(!checker.find_overlapping_prefixes().is_empty());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = GeneratorConfig {
            count: 15,
            inconsistency_rate: 0.3,
            overlap_rate: 0.4,
            seed: Some(42),
        };
        let (a, _) = run(config.clone());
        let (b, _) = run(config);
        assert_eq!(a.len(), b.len());
        for triple in a.iter() {
            assert!(b.contains(triple));
        }
    }

    #[test]
    fn recorded_bounds_match_the_cidr() {
        let (graph, _) = run(GeneratorConfig {
            count: 20,
            inconsistency_rate: 0.0,
            overlap_rate: 0.5,
            seed: Some(9),
        });
        for addr in graph.subjects_of_type(&vocab::IPV4_CLASS) {
            let cidr = graph
                .object(addr, &vocab::IP_CIDR)
                .and_then(|t| t.as_literal())
                .and_then(|l| l.as_str().map(str::to_owned))
                .unwrap();
            let start = graph
                .object(addr, &vocab::IP_NETWORK_START)
                .and_then(|t| t.as_literal())
                .and_then(Literal::as_int)
                .unwrap();
            let end = graph
                .object(addr, &vocab::IP_NETWORK_END)
                .and_then(|t| t.as_literal())
                .and_then(Literal::as_int)
                .unwrap();
            let (net, prefix) = cidr.split_once('/').unwrap();
            let subnet = Subnet::new(
                u32::from(net.parse::<Ipv4Addr>().unwrap()),
                prefix.parse().unwrap(),
            );
            assert_eq!(start, i64::from(subnet.start()));
            assert_eq!(end, i64::from(subnet.end()));
        }
    }
}
