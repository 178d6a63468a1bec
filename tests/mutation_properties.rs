//! The mutation contract: idempotence and no observable intermediate
//! state, including under a concurrent reader.

use std::thread;
use yanggraph::graph::ns::{vocab, INST};
use yanggraph::graph::pattern::{TermPattern, TriplePattern};
use yanggraph::graph::{Graph, Literal, SharedGraph, Triple};
use yanggraph::model::OperStatus;
use yanggraph::ops;

fn shared_population() -> SharedGraph {
    let mut graph = Graph::new();
    for name in ["eth0", "eth1"] {
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
            Literal::from(true),
        ));
        graph.insert(Triple::new(
            uri,
            vocab::IF_OPER_STATUS.clone(),
            Literal::from("up"),
        ));
    }
    SharedGraph::new(graph)
}

#[test]
fn double_apply_equals_single_apply() {
    let once = shared_population();
    ops::set_enabled(&once, "eth0", false).unwrap();

    let twice = shared_population();
    ops::set_enabled(&twice, "eth0", false).unwrap();
    ops::set_enabled(&twice, "eth0", false).unwrap();

    let a: Vec<_> = once.read().iter().cloned().collect();
    let b: Vec<_> = twice.read().iter().cloned().collect();
    assert_eq!(a, b);
}

#[test]
fn readers_always_see_exactly_one_status_value() {
    let shared = shared_population();
    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let status = if i % 2 == 0 {
                    OperStatus::Down
                } else {
                    OperStatus::Up
                };
                ops::set_oper_status(&shared, "eth1", status).unwrap();
            }
        })
    };

    let eth1 = INST.uri("eth1");
    for _ in 0..200 {
        let graph = shared.read();
        let count = graph
            .matching(TriplePattern::new(
                &eth1,
                vocab::IF_OPER_STATUS.clone(),
                TermPattern::Any,
            ))
            .count();
        assert_eq!(count, 1, "reader observed an intermediate state");
        drop(graph);
    }
    writer.join().unwrap();
}

#[test]
fn mutating_a_missing_interface_leaves_the_graph_untouched() {
    let shared = shared_population();
    let before: Vec<_> = shared.read().iter().cloned().collect();
    assert!(ops::set_enabled(&shared, "eth42", true).is_err());
    assert!(ops::set_oper_status(&shared, "eth42", OperStatus::Down).is_err());
    let after: Vec<_> = shared.read().iter().cloned().collect();
    assert_eq!(before, after);
}
