//! Named mutations over the instance graph.
//!
//! Each operation is one atomic store update: delete the opposite
//! assertion, insert the new one, under a single write lock. Interface
//! names are validated up front and then bound into patterns as data —
//! there is no query text for a hostile name to escape into.

use super::interfaces::find_interface;
use crate::error::{Error, Result};
use crate::graph::ns::vocab;
use crate::graph::{Literal, SharedGraph, Triple, TriplePattern, UpdateOutcome};
use crate::model::OperStatus;
use once_cell::sync::Lazy;
use regex::Regex;

static INTERFACE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.:/-]+$").expect("interface name pattern"));

/// Reject names before they reach the graph. Accepts the character set
/// real interface names use (`eth0`, `GigabitEthernet0/0/1`, `br-lan.42`).
pub fn validate_interface_name(name: &str) -> Result<()> {
    if INTERFACE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidInterfaceName(name.to_string()))
    }
}

/// Assert `enabled` for the named interface, retracting the opposite
/// value in the same step. Idempotent by set semantics.
pub fn set_enabled(shared: &SharedGraph, name: &str, enabled: bool) -> Result<UpdateOutcome> {
    validate_interface_name(name)?;
    let mut graph = shared.write();
    let iface = find_interface(&graph, name)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))?;
    let outcome = graph.update(
        &TriplePattern::new(&iface, vocab::IF_ENABLED.clone(), Literal::from(!enabled)),
        [Triple::new(
            iface.clone(),
            vocab::IF_ENABLED.clone(),
            Literal::from(enabled),
        )],
    );
    tracing::info!(interface = name, enabled, "set administrative state");
    Ok(outcome)
}

/// Assert `oper-status`, retracting the opposite status in the same step.
pub fn set_oper_status(
    shared: &SharedGraph,
    name: &str,
    status: OperStatus,
) -> Result<UpdateOutcome> {
    validate_interface_name(name)?;
    let mut graph = shared.write();
    let iface = find_interface(&graph, name)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))?;
    let outcome = graph.update(
        &TriplePattern::new(
            &iface,
            vocab::IF_OPER_STATUS.clone(),
            Literal::from(status.opposite().to_string()),
        ),
        [Triple::new(
            iface.clone(),
            vocab::IF_OPER_STATUS.clone(),
            Literal::from(status.to_string()),
        )],
    );
    tracing::info!(interface = name, status = %status, "set operational status");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ns::INST;
    use crate::graph::{Graph, Term, TermPattern};
    use assert_matches::assert_matches;

    fn shared_with(name: &str, enabled: bool, status: &str) -> SharedGraph {
        let mut graph = Graph::new();
        let uri = INST.uri(name);
        graph.insert(Triple::new(
            uri.clone(),
            vocab::TYPE.clone(),
            vocab::INTERFACE_CLASS.clone(),
        ));
        graph.insert(Triple::new(uri.clone(), vocab::IF_NAME.clone(), Literal::from(name)));
        graph.insert(Triple::new(
            uri.clone(),
            vocab::IF_ENABLED.clone(),
            Literal::from(enabled),
        ));
        graph.insert(Triple::new(
            uri,
            vocab::IF_OPER_STATUS.clone(),
            Literal::from(status),
        ));
        SharedGraph::new(graph)
    }

    fn enabled_values(shared: &SharedGraph, name: &str) -> Vec<bool> {
        let graph = shared.read();
        let uri = INST.uri(name);
        graph
            .matching(TriplePattern::new(&uri, vocab::IF_ENABLED.clone(), TermPattern::Any))
            .filter_map(|t| t.object.as_literal().and_then(Literal::as_bool))
            .collect()
    }

    #[test]
    fn toggling_replaces_the_value() {
        let shared = shared_with("eth0", true, "up");
        set_enabled(&shared, "eth0", false).unwrap();
        assert_eq!(enabled_values(&shared, "eth0"), vec![false]);
    }

    #[test]
    fn repeating_a_mutation_is_idempotent() {
        let shared = shared_with("eth0", false, "down");
        let first = set_enabled(&shared, "eth0", true).unwrap();
        let snapshot: Vec<_> = shared.read().iter().cloned().collect();
        let second = set_enabled(&shared, "eth0", true).unwrap();
        let after: Vec<_> = shared.read().iter().cloned().collect();

        assert_eq!(first.removed, 1);
        assert_eq!(second.removed, 0);
        assert_eq!(second.inserted, 0);
        assert_eq!(snapshot, after);
    }

    #[test]
    fn exactly_one_status_value_survives() {
        let shared = shared_with("eth0", true, "down");
        set_oper_status(&shared, "eth0", OperStatus::Up).unwrap();
        let graph = shared.read();
        let uri = INST.uri("eth0");
        let statuses: Vec<_> = graph
            .matching(TriplePattern::new(
                &uri,
                vocab::IF_OPER_STATUS.clone(),
                TermPattern::Any,
            ))
            .collect();
        assert_eq!(statuses.len(), 1);
        assert_eq!(
            statuses[0].object,
            Term::Literal(Literal::from("up"))
        );
    }

    #[test]
    fn unknown_interface_is_rejected_without_touching_the_graph() {
        let shared = shared_with("eth0", true, "up");
        let before = shared.read().len();
        assert_matches!(
            set_enabled(&shared, "eth9", false),
            Err(Error::InterfaceNotFound(_))
        );
        assert_eq!(shared.read().len(), before);
    }

    #[test]
    fn hostile_names_never_reach_the_store() {
        let shared = shared_with("eth0", true, "up");
        let err = set_enabled(&shared, "eth0\" . } DROP", false).unwrap_err();
        assert_matches!(err, Error::InvalidInterfaceName(_));
    }

    #[test]
    fn name_validation_accepts_real_device_names() {
        for name in ["eth0", "GigabitEthernet0/0/1", "br-lan.42", "bond0:1"] {
            assert!(validate_interface_name(name).is_ok(), "{name}");
        }
        for name in ["", "eth 0", "eth0\n", "a\"b"] {
            assert!(validate_interface_name(name).is_err(), "{name:?}");
        }
    }
}
