//! Consistency checks over a populated graph.
//!
//! Three read-only checks:
//! - missing addresses: enabled interfaces with no address of either kind
//! - duplicate prefixes: identical `(network-start, network-end)` bounds
//! - overlapping prefixes: intersecting bounds that are not duplicates
//!
//! Violations are results, not errors; an empty graph yields empty
//! reports.

use crate::graph::ns::vocab;
use crate::graph::{
    EntityConstraint, Filter, FilterTerm, Graph, Literal, Query, SubPattern, TriplePattern, Uri,
    UriPattern,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An enabled interface that no address links to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAddress {
    pub interface: Uri,
    pub name: Option<String>,
}

/// One ipv4-address entity with its recorded range bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixInfo {
    pub address: Uri,
    pub cidr: Option<String>,
    pub start: u32,
    pub end: u32,
}

/// A reported pair of addresses whose ranges collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixPair {
    pub first: PrefixInfo,
    pub second: PrefixInfo,
}

/// Everything the analyzer found in one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub missing_addresses: Vec<MissingAddress>,
    pub duplicate_prefixes: Vec<PrefixPair>,
    pub overlapping_prefixes: Vec<PrefixPair>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.missing_addresses.is_empty()
            && self.duplicate_prefixes.is_empty()
            && self.overlapping_prefixes.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.missing_addresses.len()
            + self.duplicate_prefixes.len()
            + self.overlapping_prefixes.len()
    }
}

impl fmt::Display for ConsistencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "no violations found");
        }
        for missing in &self.missing_addresses {
            match &missing.name {
                Some(name) => writeln!(f, "enabled interface {name} has no address")?,
                None => writeln!(f, "enabled interface {} has no address", missing.interface)?,
            }
        }
        for pair in &self.duplicate_prefixes {
            writeln!(
                f,
                "duplicate prefix: {} and {} both cover [{}, {}]",
                pair.first.address, pair.second.address, pair.first.start, pair.first.end
            )?;
        }
        for pair in &self.overlapping_prefixes {
            writeln!(
                f,
                "overlapping prefixes: {} [{}, {}] intersects {} [{}, {}]",
                pair.first.address,
                pair.first.start,
                pair.first.end,
                pair.second.address,
                pair.second.start,
                pair.second.end
            )?;
        }
        Ok(())
    }
}

/// Read-only analyzer over one populated graph.
pub struct ConsistencyChecker<'g> {
    graph: &'g Graph,
}

impl<'g> ConsistencyChecker<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    pub fn check_all(&self) -> ConsistencyReport {
        let report = ConsistencyReport {
            missing_addresses: self.find_missing_addresses(),
            duplicate_prefixes: self.find_duplicate_prefixes(),
            overlapping_prefixes: self.find_overlapping_prefixes(),
        };
        tracing::debug!(
            missing = report.missing_addresses.len(),
            duplicates = report.duplicate_prefixes.len(),
            overlaps = report.overlapping_prefixes.len(),
            "consistency pass complete"
        );
        report
    }

    /// Enabled interfaces with neither an ipv4-address nor an
    /// ipv6-address linking back via `interface`.
    pub fn find_missing_addresses(&self) -> Vec<MissingAddress> {
        let query = Query::new(TriplePattern::new(
            UriPattern::Any,
            vocab::TYPE.clone(),
            vocab::INTERFACE_CLASS.clone(),
        ))
        .filter(Filter::exists(SubPattern::on_subject(vec![
            EntityConstraint::new(
                vocab::IF_ENABLED.clone(),
                FilterTerm::term(Literal::from(true)),
            ),
        ])))
        .filter(Filter::not_exists(SubPattern::any_entity(vec![
            EntityConstraint::new(
                vocab::TYPE.clone(),
                FilterTerm::term(vocab::IPV4_CLASS.clone()),
            ),
            EntityConstraint::new(vocab::IP_INTERFACE.clone(), FilterTerm::Subject),
        ])))
        .filter(Filter::not_exists(SubPattern::any_entity(vec![
            EntityConstraint::new(
                vocab::TYPE.clone(),
                FilterTerm::term(vocab::IPV6_CLASS.clone()),
            ),
            EntityConstraint::new(vocab::IP_INTERFACE.clone(), FilterTerm::Subject),
        ])));

        self.graph
            .query(&query)
            .map(|t| MissingAddress {
                interface: t.subject.clone(),
                name: self.literal_of(&t.subject, &vocab::IF_NAME),
            })
            .collect()
    }

    /// Groups of addresses with identical bounds; each group of n yields
    /// n-1 pairs against its first-seen member. Addresses without both
    /// bounds are excluded from comparison.
    pub fn find_duplicate_prefixes(&self) -> Vec<PrefixPair> {
        let mut groups: IndexMap<(u32, u32), Vec<PrefixInfo>> = IndexMap::new();
        for info in self.prefix_infos() {
            groups.entry((info.start, info.end)).or_default().push(info);
        }

        let mut pairs = Vec::new();
        for group in groups.values() {
            for later in &group[1..] {
                pairs.push(PrefixPair {
                    first: group[0].clone(),
                    second: later.clone(),
                });
            }
        }
        pairs
    }

    /// Every unordered pair of distinct addresses whose inclusive ranges
    /// intersect without being identical. Identical bounds belong to the
    /// duplicate check alone.
    pub fn find_overlapping_prefixes(&self) -> Vec<PrefixPair> {
        let infos = self.prefix_infos();
        let mut pairs = Vec::new();
        for (i, a) in infos.iter().enumerate() {
            for b in &infos[i + 1..] {
                let identical = a.start == b.start && a.end == b.end;
                if !identical && a.start <= b.end && b.start <= a.end {
                    pairs.push(PrefixPair {
                        first: a.clone(),
                        second: b.clone(),
                    });
                }
            }
        }
        pairs
    }

    /// All ipv4-address entities carrying both numeric bounds, in store
    /// order.
    fn prefix_infos(&self) -> Vec<PrefixInfo> {
        self.graph
            .subjects_of_type(&vocab::IPV4_CLASS)
            .filter_map(|addr| {
                let start = self.int_of(addr, &vocab::IP_NETWORK_START)?;
                let end = self.int_of(addr, &vocab::IP_NETWORK_END)?;
                Some(PrefixInfo {
                    address: addr.clone(),
                    cidr: self.literal_of(addr, &vocab::IP_CIDR),
                    start: u32::try_from(start).ok()?,
                    end: u32::try_from(end).ok()?,
                })
            })
            .collect()
    }

    fn literal_of(&self, subject: &Uri, predicate: &Uri) -> Option<String> {
        self.graph
            .object(subject, predicate)
            .and_then(|t| t.as_literal())
            .and_then(|l| l.as_str().map(str::to_owned))
    }

    fn int_of(&self, subject: &Uri, predicate: &Uri) -> Option<i64> {
        self.graph
            .object(subject, predicate)
            .and_then(|t| t.as_literal())
            .and_then(Literal::as_int)
    }
}
