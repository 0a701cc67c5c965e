//! End-to-end runs of [`analyze`] over fixture trees.

use std::collections::BTreeSet;

use super::Fixture;
use crate::{
    AnalyzeOptions, CollisionPolicy, DescriptorLayout, EdgeOrigin, Error, PropertyCapture,
    Strategy, UnitName, analyze,
};

const SEQ: &str = "synapse/sequence";
const PROXY: &str = "synapse/proxy-service";

fn options(strategy: Strategy) -> AnalyzeOptions {
    AnalyzeOptions {
        strategy,
        workers: Some(2),
        ..AnalyzeOptions::default()
    }
}

fn two_units() -> Fixture {
    let fixture = Fixture::new();
    fixture
        .unit("CarA", &[("OrderProxy", PROXY), ("SeqA", SEQ)])
        .unit("CarB", &[("SeqB", SEQ)]);
    fixture
}

#[test]
fn test_proxy_reference_creates_edge() {
    let fixture = two_units();
    fixture.file(
        "CarA",
        "proxy-services/OrderProxy.xml",
        r#"<proxy name="OrderProxy"><target><inSequence><sequence key="SeqB"/></inSequence></target></proxy>"#,
    );

    for strategy in [Strategy::Regex, Strategy::Structural] {
        let analysis = analyze(fixture.root(), &options(strategy)).unwrap();
        let graph = analysis.primary_graph().unwrap();

        let edge = graph.edge("CarA", "CarB").expect("CarA depends on CarB");
        assert!(edge.present);
        let referenced: Vec<&str> = edge.provenance["OrderProxy"]
            .iter()
            .map(|a| a.as_str())
            .collect();
        assert_eq!(referenced, vec!["SeqB"], "strategy {strategy}");
        assert_eq!(edge.provenance.len(), 1);
        assert!(graph.edge("CarB", "CarA").is_none());
        assert!(graph.edge("CarA", "CarA").is_none(), "self reference via OrderProxy name");
    }
}

#[test]
fn test_task_sequence_reference() {
    let fixture = Fixture::new();
    fixture
        .unit("CarA", &[("Nightly", "synapse/task")])
        .unit("CarC", &[("SeqX", SEQ)])
        .file(
            "CarA",
            "tasks/Nightly.xml",
            r#"<task name="Nightly" class="org.apache.synapse.startup.tasks.MessageInjector">
                <trigger interval="60"/>
                <property name="sequenceName" value="SeqX"/>
            </task>"#,
        );

    let analysis = analyze(fixture.root(), &options(Strategy::Structural)).unwrap();
    let graph = analysis.structural.unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.edge("CarA", "CarC").unwrap().provenance["Nightly"].contains("SeqX"));
    assert_eq!(analysis.summary.structural_references, 1);
}

#[test]
fn test_files_under_target_are_never_scanned() {
    let fixture = two_units();
    fixture.write(
        &fixture
            .root()
            .join("CarA/CarAConfigs/target/src/main/synapse-config/proxy-services/Copy.xml"),
        r#"<proxy name="Copy"><sequence key="SeqB"/></proxy>"#,
    );

    let analysis = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    assert_eq!(analysis.regex.unwrap().edge_count(), 0);
    assert_eq!(analysis.structural.unwrap().edge_count(), 0);
    assert_eq!(analysis.summary.files_scanned, 0);
}

#[test]
fn test_comment_reference_is_regex_only() {
    let fixture = two_units();
    fixture.file(
        "CarA",
        "proxy-services/OrderProxy.xml",
        r#"<proxy name="OrderProxy"><!-- was: <sequence key="SeqB"/> --><target/></proxy>"#,
    );

    let analysis = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    let overlay = analysis.overlay.expect("both strategies ran");
    assert_eq!(overlay.origin("CarA", "CarB"), Some(EdgeOrigin::RegexOnly));
    assert_eq!(overlay.count(EdgeOrigin::StructuralOnly), 0);
}

#[test]
fn test_structural_reference_found_by_both() {
    let fixture = two_units();
    fixture.file(
        "CarA",
        "proxy-services/OrderProxy.xml",
        r#"<proxy name="OrderProxy"><sequence key="SeqB"/></proxy>"#,
    );

    let analysis = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    let overlay = analysis.overlay.unwrap();
    assert_eq!(overlay.origin("CarA", "CarB"), Some(EdgeOrigin::Both));
}

#[test]
fn test_rerun_is_idempotent() {
    let fixture = two_units();
    fixture
        .unit("CarC", &[("LogTemplate", "synapse/sequenceTemplate")])
        .file(
            "CarA",
            "proxy-services/OrderProxy.xml",
            r#"<proxy name="OrderProxy"><call-template target="LogTemplate"/><sequence key="SeqB"/></proxy>"#,
        )
        .file(
            "CarB",
            "sequences/SeqB.xml",
            r#"<sequence name="SeqB"><call-template target="LogTemplate"/></sequence>"#,
        );

    let first = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    let second = analyze(
        fixture.root(),
        &AnalyzeOptions {
            workers: Some(1),
            ..options(Strategy::Both)
        },
    )
    .unwrap();

    assert_eq!(first.regex, second.regex);
    assert_eq!(first.structural, second.structural);
    assert_eq!(first.overlay, second.overlay);
    assert_eq!(first.structural.unwrap().edge_count(), 3);
}

#[test]
fn test_inventory_concatenates_descriptors_of_a_unit() {
    let fixture = Fixture::new();
    fixture.unit("CarA", &[("SeqA", SEQ), ("Shared", SEQ)]);
    fixture.write(
        &fixture
            .root()
            .join("CarA/CarARegistry/src/main/resources/artifact.xml"),
        r#"<artifacts><artifact name="Shared" type="registry/resource"/><artifact name="Xsd" type="registry/resource"/></artifacts>"#,
    );

    let analysis = analyze(fixture.root(), &options(Strategy::Regex)).unwrap();
    let names: Vec<&str> = analysis
        .inventory
        .artifacts("CarA")
        .map(|a| a.as_str())
        .collect();
    assert_eq!(names, vec!["SeqA", "Shared", "Shared", "Xsd"]);
    assert!(analysis.collisions.is_empty());
}

#[test]
fn test_unit_without_descriptor_is_unattributable() {
    let fixture = two_units();
    fixture
        .file("CarZ", "proxy-services/Stray.xml", r#"<proxy name="Stray"><sequence key="SeqB"/></proxy>"#)
        .write(&fixture.root().join("loose/Loose.xml"), "<proxy/>");

    let analysis = analyze(fixture.root(), &options(Strategy::Structural)).unwrap();
    let graph = analysis.structural.unwrap();
    assert!(!graph.contains_unit("CarZ"));
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(analysis.summary.files_unattributable, 2);
}

#[test]
fn test_unrecognized_roots_are_counted() {
    let fixture = two_units();
    fixture
        .file("CarA", "endpoints/Backend.xml", r#"<endpoint name="Backend"><sequence key="SeqB"/></endpoint>"#)
        .file("CarA", "local-entries/Conf.xml", r#"<localEntry key="Conf">SeqB</localEntry>"#);

    let analysis = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    assert_eq!(analysis.summary.unrecognized.get("endpoint"), Some(&1));
    assert_eq!(analysis.summary.unrecognized.get("localEntry"), Some(&1));
    assert_eq!(analysis.structural.unwrap().edge_count(), 0);
    assert_eq!(analysis.regex.unwrap().edge_count(), 1);
}

#[test]
fn test_malformed_config_aborts_structural_scan() {
    let fixture = two_units();
    fixture.file("CarA", "proxy-services/Broken.xml", "<proxy><target></proxy>");

    let err = analyze(fixture.root(), &options(Strategy::Structural)).unwrap_err();
    assert!(matches!(err, Error::MalformedXml { ref path, .. } if path.ends_with("Broken.xml")));

    // The regex strategy never parses documents.
    assert!(analyze(fixture.root(), &options(Strategy::Regex)).is_ok());
}

#[test]
fn test_latin1_file_is_scanned_by_regex_strategy() {
    let fixture = two_units();
    // "café" in ISO-8859-1 is not valid UTF-8.
    let latin1 = [
        &b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n"[..],
        b"<proxy name=\"OrderProxy\"><!-- caf\xe9 -->",
        b"<sequence key=\"SeqB\"/></proxy>",
    ]
    .concat();
    fixture.write(
        &fixture.config_dir("CarA").join("proxy-services/OrderProxy.xml"),
        &latin1,
    );

    let analysis = analyze(fixture.root(), &options(Strategy::Regex)).unwrap();
    let graph = analysis.regex.unwrap();
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.edge("CarA", "CarB").unwrap().provenance["OrderProxy"].contains("SeqB"));

    let err = analyze(fixture.root(), &options(Strategy::Structural)).unwrap_err();
    assert!(matches!(err, Error::NotUtf8 { ref path, .. } if path.ends_with("OrderProxy.xml")));
}

#[test]
fn test_malformed_descriptor_aborts_run() {
    let fixture = two_units();
    fixture.write(
        &fixture.config_dir("CarB").join("nested/artifact.xml"),
        "<artifacts><artifact name=\"X\"",
    );
    let err = analyze(fixture.root(), &options(Strategy::Regex)).unwrap_err();
    assert!(matches!(err, Error::MalformedXml { .. }));
}

#[test]
fn test_collision_policies() {
    let fixture = Fixture::new();
    fixture
        .unit("CarA", &[("Shared", SEQ)])
        .unit("CarB", &[("Shared", SEQ)])
        .unit("CarC", &[("Caller", PROXY)])
        .file("CarC", "proxy-services/Caller.xml", r#"<proxy name="Caller"><sequence key="Shared"/></proxy>"#);

    let analysis = analyze(fixture.root(), &options(Strategy::Structural)).unwrap();
    assert_eq!(analysis.collisions.len(), 1);
    let graph = analysis.structural.unwrap();
    assert!(graph.edge("CarC", "CarB").is_some());
    assert!(graph.edge("CarC", "CarA").is_none());

    let reject = AnalyzeOptions {
        collisions: CollisionPolicy::Reject,
        ..options(Strategy::Structural)
    };
    let err = analyze(fixture.root(), &reject).unwrap_err();
    assert!(matches!(err, Error::ArtifactCollision { .. }));
}

#[test]
fn test_property_capture_modes() {
    let fixture = two_units();
    fixture.file(
        "CarA",
        "sequences/SeqA.xml",
        r#"<sequence name="SeqA"><property name="p" expression="get-property('SeqB')"/></sequence>"#,
    );

    let call = analyze(fixture.root(), &options(Strategy::Structural)).unwrap();
    assert_eq!(call.structural.unwrap().edge_count(), 0);

    let name = AnalyzeOptions {
        capture: PropertyCapture::Name,
        ..options(Strategy::Structural)
    };
    let analysis = analyze(fixture.root(), &name).unwrap();
    assert!(analysis.structural.unwrap().edge("CarA", "CarB").is_some());
}

#[test]
fn test_grandparent_descriptor_layout() {
    let fixture = Fixture::new();
    fixture
        .write(
            &fixture.root().join("CarA/CarAConfigs/artifact.xml"),
            r#"<artifacts><artifact name="ProxyA" type="synapse/proxy-service"/></artifacts>"#,
        )
        .write(
            &fixture.root().join("CarB/CarBConfigs/artifact.xml"),
            r#"<artifacts><artifact name="SeqB" type="synapse/sequence"/></artifacts>"#,
        )
        .file("CarA", "proxy-services/ProxyA.xml", r#"<proxy name="ProxyA"><sequence key="SeqB"/></proxy>"#);

    let src = analyze(fixture.root(), &options(Strategy::Structural)).unwrap();
    assert!(src.inventory.is_empty());

    let grandparent = AnalyzeOptions {
        layout: DescriptorLayout::Grandparent,
        ..options(Strategy::Structural)
    };
    let analysis = analyze(fixture.root(), &grandparent).unwrap();
    let units: BTreeSet<&UnitName> = analysis.inventory.units().collect();
    assert_eq!(units.len(), 2);
    assert!(analysis.structural.unwrap().edge("CarA", "CarB").is_some());
}

#[test]
fn test_empty_tree() {
    let fixture = Fixture::new();
    let analysis = analyze(fixture.root(), &options(Strategy::Both)).unwrap();
    assert!(analysis.inventory.is_empty());
    assert_eq!(analysis.overlay.unwrap().edge_count(), 0);
}
