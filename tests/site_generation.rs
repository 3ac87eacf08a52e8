//! End-to-end site generation against a fixture export on disk.

use branchview::site;
use std::fs;

const EXPORT: &str = r#"{
    "state": {
        "My Story": {
            "nodes": {
                "a": {"parentId": null, "value": "Once upon a time"},
                "b": {"parentId": "a", "text": " there was a fork."},
                "c": {"parentId": "a", "value": " there was a merge."}
            }
        },
        "Weird/Name?": {
            "nodes": [
                {"id": "r", "parentId": null, "value": "root"},
                {"id": "x", "parentId": "r", "text": "leaf"}
            ]
        },
        "Empty Doc": {
            "nodes": {}
        },
        "Broken Doc": {
            "nodes": [{"value": "record without an id"}]
        }
    }
}"#;

#[test]
fn test_generate_site_from_fixture() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    let out = dir.path().join("dist");
    fs::write(&input, EXPORT).unwrap();

    let summary = site::generate(&input, &out).unwrap();

    // Broken Doc is skipped, everything else renders (empty docs included).
    assert_eq!(summary.skipped, 1);
    let filenames: Vec<&str> = summary
        .written
        .iter()
        .map(|e| e.filename.as_str())
        .collect();
    assert_eq!(
        filenames,
        vec!["My Story.html", "WeirdName.html", "Empty Doc.html"]
    );
    assert_eq!(summary.written[0].node_count, 3);
    assert_eq!(summary.written[1].node_count, 2);
    assert_eq!(summary.written[2].node_count, 0);

    // Assets plus one page per document plus the index.
    for artifact in [
        "style.css",
        "viewer.js",
        "index.html",
        "My Story.html",
        "WeirdName.html",
        "Empty Doc.html",
    ] {
        assert!(out.join(artifact).exists(), "missing {artifact}");
    }

    let page = fs::read_to_string(out.join("My Story.html")).unwrap();
    assert!(page.contains("<title>My Story</title>"));
    assert!(page.contains("\"rootId\":\"a\""));
    assert!(page.contains("\"children\":[\"b\",\"c\"]"));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("href=\"My Story.html\""));
    assert!(index.contains("3 nodes"));
    assert!(index.contains("Weird/Name?"));
    assert!(!index.contains("Broken Doc"));
}

#[test]
fn test_generate_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    fs::write(&input, EXPORT).unwrap();

    let out1 = dir.path().join("dist1");
    let out2 = dir.path().join("dist2");
    site::generate(&input, &out1).unwrap();
    site::generate(&input, &out2).unwrap();

    for artifact in ["My Story.html", "WeirdName.html", "index.html"] {
        assert_eq!(
            fs::read_to_string(out1.join(artifact)).unwrap(),
            fs::read_to_string(out2.join(artifact)).unwrap(),
            "non-deterministic output for {artifact}"
        );
    }
}

#[test]
fn test_generate_wipes_stale_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    let out = dir.path().join("dist");
    fs::write(&input, EXPORT).unwrap();

    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.html"), "old run").unwrap();

    site::generate(&input, &out).unwrap();
    assert!(!out.join("stale.html").exists());
}

#[test]
fn test_missing_state_yields_empty_site() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    let out = dir.path().join("dist");
    fs::write(&input, "{}").unwrap();

    let summary = site::generate(&input, &out).unwrap();
    assert!(summary.written.is_empty());
    assert_eq!(summary.skipped, 0);
    assert!(out.join("index.html").exists());
}

#[test]
fn test_unreadable_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = site::generate(&dir.path().join("nope.json"), &dir.path().join("dist"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read export file"));
}

#[test]
fn test_multi_root_document_renders_last_winner() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("data.json");
    let out = dir.path().join("dist");
    fs::write(
        &input,
        r#"{"state": {"doc": {"nodes": {
            "a": {"parentId": null},
            "b": {"parentId": null}
        }}}}"#,
    )
    .unwrap();

    site::generate(&input, &out).unwrap();
    let page = fs::read_to_string(out.join("doc.html")).unwrap();
    assert!(page.contains("\"rootId\":\"b\""));
}
