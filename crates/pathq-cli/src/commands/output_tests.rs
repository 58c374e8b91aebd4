use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use pathq_core::Graph;

use super::common::{load_graph, load_script};
use super::info::format_info;
use super::rpq::{format_pairs, format_per_source};

fn pairs(items: &[(&str, &str)]) -> BTreeSet<(String, String)> {
    items
        .iter()
        .map(|(a, b)| ((*a).to_owned(), (*b).to_owned()))
        .collect()
}

#[test]
fn pairs_as_lines() {
    let text = format_pairs(&pairs(&[("1", "2"), ("0", "2"), ("0", "1")]), false);
    insta::assert_snapshot!(text, @r"
    0 -> 1
    0 -> 2
    1 -> 2
    ");
}

#[test]
fn pairs_as_json() {
    let text = format_pairs(&pairs(&[("0", "1")]), true);
    insta::assert_snapshot!(text, @r#"
    [
      [
        "0",
        "1"
      ]
    ]
    "#);
}

#[test]
fn empty_result_prints_nothing() {
    assert_eq!(format_pairs(&BTreeSet::new(), false), "");
    assert_eq!(format_pairs(&BTreeSet::new(), true), "[]\n");
}

#[test]
fn per_source_lines() {
    let mut reachable: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    reachable.insert("0".into(), ["1".to_owned(), "2".to_owned()].into());
    reachable.insert("1".into(), BTreeSet::new());
    insta::assert_snapshot!(format_per_source(&reachable, false), @r"
    0: [1, 2]
    1: []
    ");
    insta::assert_snapshot!(format_per_source(&reachable, true), @r#"
    {
      "0": [
        "1",
        "2"
      ],
      "1": []
    }
    "#);
}

#[test]
fn info_text_and_json() {
    let graph = Graph::from_edges([("0", "a", "1"), ("1", "b", "0"), ("1", "a", "2")]);
    let info = graph.info();
    insta::assert_snapshot!(format_info(&info, false), @r"
    vertices: 3
    edges: 3
    labels: a, b
    ");
    insta::assert_snapshot!(format_info(&info, true), @r#"
    {
      "vertices": 3,
      "edges": 3,
      "labels": [
        "a",
        "b"
      ]
    }
    "#);
}

#[test]
fn graph_files_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("g.json");
    std::fs::write(&json, r#"{"vertices": ["z"], "edges": [["x", "a", "y"]]}"#).unwrap();
    let list = dir.path().join("g.edges");
    std::fs::write(&list, "# comment\nx a y\ny b x\n").unwrap();

    assert_eq!(load_graph(&json).vertex_count(), 3);
    assert_eq!(load_graph(&list).edge_count(), 2);

    let dot = dir.path().join("g.dot");
    std::fs::write(&dot, load_graph(&list).to_dot()).unwrap();
    assert_eq!(load_graph(&dot), load_graph(&list));
}

#[test]
fn script_from_text_or_file() {
    assert_eq!(load_script(None, Some("print 1;")).unwrap(), "print 1;");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s.pq");
    std::fs::write(&path, "print 2;").unwrap();
    assert_eq!(load_script(Some(&path), None).unwrap(), "print 2;");

    let err = load_script(Some(Path::new("/nonexistent/s.pq")), None).unwrap_err();
    assert!(err.starts_with("failed to read '/nonexistent/s.pq'"), "{err}");
    assert!(load_script(None, None).is_err());
}
