//! Namespaces and the vocabulary used across the graph.
//!
//! Three conventional namespaces are consumed downstream: the schema
//! namespace (`yang:`), the IETF interface/IP namespaces, and the
//! instance namespace for entity URIs.

use super::term::Uri;
use once_cell::sync::Lazy;

/// A namespace: a prefix for Turtle compaction and a base IRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    prefix: &'static str,
    base: &'static str,
}

impl Namespace {
    pub const fn new(prefix: &'static str, base: &'static str) -> Self {
        Self { prefix, base }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub fn base(&self) -> &'static str {
        self.base
    }

    /// Qualify a fragment into a full URI.
    pub fn uri(&self, fragment: &str) -> Uri {
        Uri::new(format!("{}{}", self.base, fragment))
    }

    /// Strip the base from a URI, returning the local part if it matches.
    pub fn strip<'a>(&self, uri: &'a Uri) -> Option<&'a str> {
        uri.as_str().strip_prefix(self.base)
    }
}

pub const RDF: Namespace = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");
pub const YANG: Namespace = Namespace::new("yang", "http://example.org/yang#");
pub const INST: Namespace = Namespace::new("inst", "http://example.org/instances#");
pub const IF: Namespace = Namespace::new("if", "urn:ietf:params:xml:ns:yang:ietf-interfaces#");
pub const IP: Namespace = Namespace::new("ip", "urn:ietf:params:xml:ns:yang:ietf-ip#");

/// Every namespace the serializer declares, in declaration order.
pub fn all() -> [Namespace; 7] {
    [RDF, RDFS, XSD, YANG, INST, IF, IP]
}

/// Well-known URIs, built once.
pub mod vocab {
    use super::*;

    pub static TYPE: Lazy<Uri> = Lazy::new(|| RDF.uri("type"));
    pub static LABEL: Lazy<Uri> = Lazy::new(|| RDFS.uri("label"));
    pub static HAS_CHILD: Lazy<Uri> = Lazy::new(|| YANG.uri("hasChild"));

    pub static INTERFACE_CLASS: Lazy<Uri> = Lazy::new(|| IF.uri("Interface"));
    pub static IF_NAME: Lazy<Uri> = Lazy::new(|| IF.uri("name"));
    pub static IF_ENABLED: Lazy<Uri> = Lazy::new(|| IF.uri("enabled"));
    pub static IF_OPER_STATUS: Lazy<Uri> = Lazy::new(|| IF.uri("oper-status"));

    pub static IPV4_CLASS: Lazy<Uri> = Lazy::new(|| IP.uri("ipv4-address"));
    pub static IPV6_CLASS: Lazy<Uri> = Lazy::new(|| IP.uri("ipv6-address"));
    pub static IP_ADDR: Lazy<Uri> = Lazy::new(|| IP.uri("ip"));
    pub static IP_PREFIX_LENGTH: Lazy<Uri> = Lazy::new(|| IP.uri("prefix-length"));
    pub static IP_INTERFACE: Lazy<Uri> = Lazy::new(|| IP.uri("interface"));
    pub static IP_CIDR: Lazy<Uri> = Lazy::new(|| IP.uri("cidr"));
    pub static IP_NETWORK_START: Lazy<Uri> = Lazy::new(|| IP.uri("network-start"));
    pub static IP_NETWORK_END: Lazy<Uri> = Lazy::new(|| IP.uri("network-end"));
}
