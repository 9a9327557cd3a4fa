use std::{fs, path::Path};

use tempfile::tempdir;

use liaison_cli::{Args, run};

const BRIBERY: &str = r#"{
    "nodes": [
        {"id": "甲", "label": "市长", "group": "官员"},
        {"id": "乙", "label": "地产公司", "group": "企业"},
        {"id": "丁", "label": "建筑公司", "group": "企业"}
    ],
    "links": [
        {"source": "甲", "target": "乙", "relation": "行贿"},
        {"source": "乙", "target": "丁", "relation": "投资"},
        {"source": "甲", "target": "丙", "relation": "指使"}
    ]
}"#;

fn args(input: &Path, output: &Path) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        width: 800.0,
        height: 600.0,
        events: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_render_graph() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("graph.json");
    let output = temp_dir.path().join("graph.svg");
    fs::write(&input, BRIBERY).expect("Failed to write input");

    run(&args(&input, &output)).expect("Rendering should succeed");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("行贿"));
    assert!(svg.contains("投资"));
    // The dangling relationship is dropped
    assert!(!svg.contains("指使"));
}

#[test]
fn e2e_replayed_session() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("graph.json");
    let events = temp_dir.path().join("session.json");
    let output = temp_dir.path().join("graph.svg");
    fs::write(&input, BRIBERY).expect("Failed to write input");
    fs::write(
        &events,
        r#"{"events": [
            {"at_ms": 0, "event": {"type": "pointer_down", "x": 680, "y": 250}},
            {"at_ms": 16, "event": {"type": "pointer_move", "x": 600, "y": 300}},
            {"at_ms": 32, "event": {"type": "pointer_up", "x": 600, "y": 300}},
            {"at_ms": 48, "event": {"type": "zoom_in"}},
            {"at_ms": 64, "event": {"type": "resize", "width": 1000, "height": 800}}
        ]}"#,
    )
    .expect("Failed to write session");

    let mut args = args(&input, &output);
    args.events = Some(events.to_string_lossy().to_string());
    run(&args).expect("Replay should succeed");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    // The flushed resize redraw sets the final viewport
    assert!(svg.contains("viewBox=\"0 0 1000 800\""));
    assert!(svg.contains("scale(1.1)"));
}

#[test]
fn e2e_empty_graph() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = temp_dir.path().join("empty.json");
    let output = temp_dir.path().join("empty.svg");
    fs::write(&input, r#"{"nodes": [], "links": []}"#).expect("Failed to write input");

    run(&args(&input, &output)).expect("Empty graph still renders");

    let svg = fs::read_to_string(&output).expect("Output should exist");
    assert!(svg.contains(liaison::EMPTY_MESSAGE));
    assert!(!svg.contains("data-role=\"scene\""));
}

#[test]
fn e2e_invalid_inputs_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.svg");

    let missing = temp_dir.path().join("missing.json");
    assert!(run(&args(&missing, &output)).is_err());

    let duplicate = temp_dir.path().join("duplicate.json");
    fs::write(
        &duplicate,
        r#"{"nodes": [{"id": "甲", "group": "官员"}, {"id": "甲", "group": "企业"}]}"#,
    )
    .expect("Failed to write input");
    assert!(run(&args(&duplicate, &output)).is_err());

    let mut zero = args(&missing, &output);
    zero.width = 0.0;
    assert!(run(&zero).is_err());

    assert!(!output.exists());
}
