//! End-to-end pipeline tests: JSON document -> graph -> annotation ->
//! report and plot point files.

use std::fs;

use dmv::{ComponentGraph, ComponentRecord, GraphError, annotate, write_points_json, write_report};

const ARCHITECTURE: &str = r#"[
    {
        "name": "Core",
        "modules": [
            { "name": "Engine", "kind": "normal", "dependencies": [] },
            { "name": "Api", "kind": "interface", "dependencies": [] }
        ]
    },
    {
        "name": "Storage",
        "modules": [
            { "name": "Cache", "kind": "normal", "dependencies": ["Core.Engine"] }
        ]
    },
    {
        "name": "UI",
        "modules": [
            { "name": "Window", "kind": "normal", "dependencies": ["Core.Api", "Storage.Cache"] },
            { "name": "Widget", "kind": "normal", "dependencies": ["Core.Engine", "Core.Api"] }
        ]
    }
]"#;

fn load(json: &str) -> Result<ComponentGraph, GraphError> {
    let records: Vec<ComponentRecord> = serde_json::from_str(json).expect("valid test document");
    ComponentGraph::new(records)
}

#[test]
fn document_round_trips_to_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("architecture.json");
    let report_path = dir.path().join("report.txt");
    fs::write(&input_path, ARCHITECTURE).unwrap();

    let source = fs::read_to_string(&input_path).unwrap();
    let mut graph = load(&source).unwrap();
    annotate(&mut graph);

    let mut file = fs::File::create(&report_path).unwrap();
    write_report(&graph, &mut file).unwrap();

    let report = fs::read_to_string(&report_path).unwrap();
    assert!(report.starts_with("Component 'Core'\n"));
    // Core: A = 1/2, fan_in = 3 (Cache, Window, Widget), fan_out = 0.
    assert!(report.contains("Abstractness: 0.500, Instability: 0.000, Distance: 0.500"));
    assert!(report.contains("        Dependency 'Core.Api'\n"));
    assert!(report.contains("        Dependency 'Storage.Cache'\n"));
    // Blank separator after every component block.
    assert_eq!(report.matches("\n\n").count(), 3);
}

#[test]
fn annotation_covers_every_component() {
    let mut graph = load(ARCHITECTURE).unwrap();
    annotate(&mut graph);

    for component in graph.components() {
        assert!(component.metrics.is_some(), "{} not annotated", component.name);
    }

    // UI depends outward only: maximally unstable.
    let ui = graph.get("UI").unwrap().metrics.unwrap();
    assert_eq!(ui.fan_out_dependencies, 2);
    assert_eq!(ui.fan_in_dependencies, 0);
    assert_eq!(ui.instability, 1.0);

    // Storage: depended on by Window, depends on Core.
    let storage = graph.get("Storage").unwrap().metrics.unwrap();
    assert_eq!(storage.fan_in_dependencies, 1);
    assert_eq!(storage.fan_out_dependencies, 1);
    assert_eq!(storage.instability, 0.5);
}

#[test]
fn plot_points_written_as_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let points_path = dir.path().join("points.json");

    let mut graph = load(ARCHITECTURE).unwrap();
    annotate(&mut graph);

    let mut file = fs::File::create(&points_path).unwrap();
    write_points_json(&graph, &mut file).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&points_path).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);
    assert_eq!(parsed[0]["component"], "Core");
    assert_eq!(parsed[0]["abstractness"], 0.5);
    assert_eq!(parsed[2]["instability"], 1.0);
}

#[test]
fn dangling_reference_fails_before_any_metrics_exist() {
    let json = r#"[
        {
            "name": "App",
            "modules": [
                { "name": "Main", "kind": "normal", "dependencies": ["Missing.Module"] }
            ]
        }
    ]"#;

    let err = load(json).unwrap_err();
    assert_eq!(
        err,
        GraphError::MissingComponent {
            component: "Missing".to_string()
        }
    );
}
