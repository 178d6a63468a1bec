//! Interface queries: count, list, and per-interface detail.

use crate::error::{Error, Result};
use crate::graph::ns::vocab;
use crate::graph::{Graph, Literal, Term, TriplePattern, Uri, UriPattern};
use crate::model::{InterfaceDetails, InterfaceSummary};

pub fn count_interfaces(graph: &Graph) -> usize {
    graph.subjects_of_type(&vocab::INTERFACE_CLASS).count()
}

pub fn list_interfaces(graph: &Graph) -> Vec<InterfaceSummary> {
    graph
        .subjects_of_type(&vocab::INTERFACE_CLASS)
        .map(|uri| InterfaceSummary {
            interface: uri.to_string(),
            name: string_of(graph, uri, &vocab::IF_NAME),
            enabled: bool_of(graph, uri, &vocab::IF_ENABLED),
            oper_status: string_of(graph, uri, &vocab::IF_OPER_STATUS),
        })
        .collect()
}

pub fn interface_details(graph: &Graph, name: &str) -> Result<InterfaceDetails> {
    let iface = find_interface(graph, name)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))?;

    let ipv4 = address_of(graph, &iface, &vocab::IPV4_CLASS);
    let ipv6 = address_of(graph, &iface, &vocab::IPV6_CLASS);

    Ok(InterfaceDetails {
        interface: iface.to_string(),
        name: name.to_string(),
        enabled: bool_of(graph, &iface, &vocab::IF_ENABLED),
        oper_status: string_of(graph, &iface, &vocab::IF_OPER_STATUS),
        ipv4: ipv4
            .as_ref()
            .and_then(|addr| string_of(graph, addr, &vocab::IP_ADDR)),
        prefix_length: ipv4.as_ref().and_then(|addr| {
            graph
                .object(addr, &vocab::IP_PREFIX_LENGTH)
                .and_then(Term::as_literal)
                .and_then(Literal::as_int)
        }),
        cidr: ipv4
            .as_ref()
            .and_then(|addr| string_of(graph, addr, &vocab::IP_CIDR)),
        ipv6: ipv6
            .as_ref()
            .and_then(|addr| string_of(graph, addr, &vocab::IP_ADDR)),
    })
}

/// Resolve an interface by its `name` leaf. The name is matched as a bound
/// literal, never interpolated into anything.
pub(crate) fn find_interface(graph: &Graph, name: &str) -> Option<Uri> {
    graph
        .matching(TriplePattern::new(
            UriPattern::Any,
            vocab::IF_NAME.clone(),
            Literal::from(name),
        ))
        .map(|t| t.subject.clone())
        .find(|subject| {
            graph
                .matching(TriplePattern::new(
                    subject,
                    vocab::TYPE.clone(),
                    vocab::INTERFACE_CLASS.clone(),
                ))
                .next()
                .is_some()
        })
}

/// First address entity of the given class linking back to the interface.
fn address_of(graph: &Graph, iface: &Uri, class: &Uri) -> Option<Uri> {
    graph
        .matching(TriplePattern::new(
            UriPattern::Any,
            vocab::IP_INTERFACE.clone(),
            iface,
        ))
        .map(|t| t.subject.clone())
        .find(|subject| {
            graph
                .matching(TriplePattern::new(subject, vocab::TYPE.clone(), class))
                .next()
                .is_some()
        })
}

fn string_of(graph: &Graph, subject: &Uri, predicate: &Uri) -> Option<String> {
    graph
        .object(subject, predicate)
        .and_then(Term::as_literal)
        .map(Literal::lexical)
}

fn bool_of(graph: &Graph, subject: &Uri, predicate: &Uri) -> Option<bool> {
    graph
        .object(subject, predicate)
        .and_then(Term::as_literal)
        .and_then(Literal::as_bool)
}
