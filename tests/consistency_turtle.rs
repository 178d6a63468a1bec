//! Analyzer behavior over instance data loaded from Turtle text, the way
//! the check command sees it.

use yanggraph::analysis::ConsistencyChecker;
use yanggraph::graph::turtle;

const INSTANCES: &str = r#"
@prefix inst: <http://example.org/instances#> .
@prefix if: <urn:ietf:params:xml:ns:yang:ietf-interfaces#> .
@prefix ip: <urn:ietf:params:xml:ns:yang:ietf-ip#> .

inst:eth0 a if:Interface ;
    if:name "eth0" ;
    if:enabled true ;
    if:oper-status "up" .

inst:eth1 a if:Interface ;
    if:name "eth1" ;
    if:enabled true ;
    if:oper-status "down" .

inst:eth2 a if:Interface ;
    if:name "eth2" ;
    if:enabled true ;
    if:oper-status "up" .

inst:eth1_ipv4 a ip:ipv4-address ;
    ip:ip "10.0.0.5" ;
    ip:prefix-length 24 ;
    ip:cidr "10.0.0.0/24" ;
    ip:network-start 167772160 ;
    ip:network-end 167772415 ;
    ip:interface inst:eth1 .

inst:eth2_ipv4 a ip:ipv4-address ;
    ip:ip "10.0.0.9" ;
    ip:prefix-length 24 ;
    ip:cidr "10.0.0.0/24" ;
    ip:network-start 167772160 ;
    ip:network-end 167772415 ;
    ip:interface inst:eth2 .

inst:eth2_ipv4b a ip:ipv4-address ;
    ip:ip "10.0.0.44" ;
    ip:network-start 167772200 ;
    ip:network-end 167772450 ;
    ip:interface inst:eth2 .
"#;

#[test]
fn missing_addresses_are_exactly_the_unaddressed_enabled_interfaces() {
    let graph = turtle::parse(INSTANCES, "inline").unwrap();
    let missing = ConsistencyChecker::new(&graph).find_missing_addresses();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].name.as_deref(), Some("eth0"));
}

#[test]
fn duplicates_and_overlaps_split_as_specified() {
    let graph = turtle::parse(INSTANCES, "inline").unwrap();
    let checker = ConsistencyChecker::new(&graph);

    // The two identical /24 ranges are one duplicate pair, reported only
    // by the duplicate check.
    let duplicates = checker.find_duplicate_prefixes();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].first.start, 167_772_160);
    assert_eq!(duplicates[0].first.end, 167_772_415);

    // The partially overlapping range pairs with each of the duplicates,
    // and the duplicate pair itself is not repeated here.
    let overlaps = checker.find_overlapping_prefixes();
    assert_eq!(overlaps.len(), 2);
    for pair in &overlaps {
        let spans = [
            (pair.first.start, pair.first.end),
            (pair.second.start, pair.second.end),
        ];
        assert!(spans.contains(&(167_772_200, 167_772_450)));
    }
}

#[test]
fn full_report_aggregates_all_three_checks() {
    let graph = turtle::parse(INSTANCES, "inline").unwrap();
    let report = ConsistencyChecker::new(&graph).check_all();
    assert!(!report.is_clean());
    assert_eq!(report.violation_count(), 4);

    let text = report.to_string();
    assert!(text.contains("eth0 has no address"));
    assert!(text.contains("duplicate prefix"));
    assert!(text.contains("overlapping prefixes"));
}
