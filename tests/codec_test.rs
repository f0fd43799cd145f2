//! Codec tests: XML documents, pretty printing and file output

use aida_query::codec::{self, Payload};
use aida_query::core::{
    make_edge, make_entry_point, make_graph_query, Descriptors, GraphQuery, StringDescriptor,
    TextDescriptor, VideoDescriptor,
};
use aida_query::error::Error;
use aida_query::extraction::PredicateGroups;
use serde_json::json;
use std::fs;

fn names(n: usize) -> Vec<StringDescriptor> {
    (0..n).map(|i| StringDescriptor { name_string: format!("name{}", i) }).collect()
}

fn sample_query() -> GraphQuery {
    let descriptors = Descriptors {
        strings: Some(names(12)),
        texts: Some(vec![TextDescriptor {
            doceid: "D1".to_string(),
            start: "0".to_string(),
            end: "4".to_string(),
        }]),
        videos: Some(vec![VideoDescriptor {
            doceid: "V1".to_string(),
            keyframeid: "V1_kf3".to_string(),
            topleft: "10,20".to_string(),
            bottomright: "110,220".to_string(),
        }]),
        images: None,
    };
    make_graph_query(
        vec![
            make_edge("http://ev/1", "http://ldc#Conflict.Attack_Attacker", "http://ent/1"),
            make_edge("http://ev/1", "Conflict.Attack_Place", "http://ent/2"),
        ],
        vec![
            make_entry_point("http://ent/1", "http://ldc#Person", descriptors),
            make_entry_point("http://ent/2", "GPE", Descriptors::default()),
        ],
    )
}

#[test]
fn test_round_trip_reproduces_sampled_query() {
    let query = sample_query();
    assert_eq!(query.entrypoints[0].descriptors.strings.as_ref().unwrap().len(), 3);

    let element = codec::to_xml(&query, "Q001");
    let (id, decoded) = codec::from_xml(&element).unwrap();
    assert_eq!(id, "Q001");
    assert_eq!(decoded, query);
    assert_eq!(decoded.entrypoints[0].descriptors.strings, Some(names(3)));
    assert_eq!(decoded.entrypoints[1].descriptors, Descriptors::default());
}

#[test]
fn test_round_trip_through_pretty_document() {
    let query = sample_query();
    let document = codec::to_xml_string(&query, "Q001").unwrap();
    assert!(document.contains("<query id=\"Q001\">"));
    assert!(document.contains("<edge id=\"Q001_1\">"));
    assert!(document.contains("<predicate>Conflict.Attack_Place</predicate>"));

    let (_, decoded) = codec::parse_xml_str(&document).unwrap();
    assert_eq!(decoded, query);
}

#[test]
fn test_empty_query_encodes() {
    let query = make_graph_query(vec![], vec![]);
    let (id, decoded) = codec::from_xml(&codec::to_xml(&query, "empty")).unwrap();
    assert_eq!(id, "empty");
    assert_eq!(decoded, query);
}

#[test]
fn test_document_without_graph_is_malformed() {
    let err = codec::parse_xml_str(r#"<query id="Q"><entrypoints/></query>"#).unwrap_err();
    assert!(matches!(err, Error::MalformedQuery(_)));

    let err = codec::parse_xml_str("not xml at all").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
}

#[test]
fn test_json_and_xml_agree() {
    let query = sample_query();
    let json = serde_json::to_value(&query).unwrap();
    assert_eq!(json["graph"]["edges"][1]["predicate"], "Conflict.Attack_Place");
    assert_eq!(json["entrypoints"][0]["enttype"], "Person");
    assert_eq!(json["entrypoints"][0]["video_descriptor"][0]["keyframeid"], "V1_kf3");
    assert!(json["entrypoints"][0].get("image_descriptor").is_none());
    assert_eq!(json["entrypoints"][1], json!({"node": "http://ent/2", "enttype": "GPE"}));

    let back: GraphQuery = serde_json::from_value(json).unwrap();
    assert_eq!(back, query);
}

#[test]
fn test_write_json_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/nested/deeper/Q001.json", dir.path().display());

    let query = sample_query();
    Payload::json(&query).unwrap().write_file(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("{\n  \"graph\": {"));
    let back: GraphQuery = serde_json::from_str(&written).unwrap();
    assert_eq!(back, query);
}

#[test]
fn test_write_list_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/events.json", dir.path().display());
    Payload::json(&vec!["http://ev/1", "http://ev/2"]).unwrap().write_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  \"http://ev/1\",\n  \"http://ev/2\"\n]");
}

#[test]
fn test_write_xml_then_read_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/xml/Q001.xml", dir.path().display());
    let query = sample_query();

    Payload::from(codec::to_xml(&query, "Q001")).write_file(&path).unwrap();
    let (_, decoded) = codec::parse_xml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(decoded, query);
}

#[test]
fn test_write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/note.txt", dir.path().display());
    Payload::from("first version, quite long").write_file(&path).unwrap();
    Payload::from("second").write_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn test_write_text_reindents_xml_and_keeps_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let xml_path = format!("{}/doc.xml", dir.path().display());
    let txt_path = format!("{}/doc.txt", dir.path().display());

    Payload::from("<a><b>x</b></a>").write_file(&xml_path).unwrap();
    assert!(fs::read_to_string(&xml_path).unwrap().contains("<a>\n  <b>x</b>\n</a>"));

    Payload::from_bytes(b"plain <text".to_vec()).unwrap().write_file(&txt_path).unwrap();
    assert_eq!(fs::read_to_string(&txt_path).unwrap(), "plain <text");
}

#[test]
fn test_print_xml_payload() {
    let mut out = Vec::new();
    Payload::from(codec::to_xml(&sample_query(), "Q9")).print_to(&mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("<query id=\"Q9\">"));
    assert!(printed.contains("<name_string>name2</name_string>"));
    assert!(!printed.contains("name3"));
}

fn printed(payload: &Payload) -> String {
    let mut out = Vec::new();
    payload.print_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_json_keeps_field_order() {
    let query = make_graph_query(
        vec![make_edge("s", "http://x#p", "o")],
        vec![make_entry_point("n", "http://x#Person", Descriptors::default())],
    );
    let out = printed(&Payload::json(&query).unwrap());
    assert_eq!(
        out,
        "{\n  \"graph\": {\n    \"edges\": [\n      {\n        \"subject\": \"s\",\n        \"predicate\": \"p\",\n        \"object\": \"o\"\n      }\n    ]\n  },\n  \"entrypoints\": [\n    {\n      \"node\": \"n\",\n      \"enttype\": \"Person\"\n    }\n  ]\n}\n"
    );
}

#[test]
fn test_json_keeps_predicate_group_order() {
    let mut groups = PredicateGroups::new();
    groups.insert("http://x#zeta".to_string(), vec!["o1".to_string()]);
    groups.insert("http://x#alpha".to_string(), vec!["o2".to_string()]);

    let out = printed(&Payload::json(&groups).unwrap());
    let zeta = out.find("zeta").unwrap();
    let alpha = out.find("alpha").unwrap();
    assert!(zeta < alpha);
}

#[test]
fn test_several_roots_print_as_plain_text() {
    assert_eq!(printed(&Payload::from("<a/><b/>")), "<a/><b/>\n");
    assert_eq!(printed(&Payload::from("<a/><!-- trailing -->")), "<a/><!-- trailing -->\n");
}

#[test]
fn test_several_roots_write_as_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = format!("{}/roots.xml", dir.path().display());
    Payload::from("<a/><b/>").write_file(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "<a/><b/>");
}

#[test]
fn test_whitespace_values_survive_xml() {
    let query = make_graph_query(
        vec![make_edge("http://ev/1", "http://ldc#Conflict.Attack_Place", "  ")],
        vec![make_entry_point(
            "http://ent/1",
            "Person",
            Descriptors {
                strings: Some(vec![
                    StringDescriptor { name_string: " ".to_string() },
                    StringDescriptor { name_string: " padded ".to_string() },
                ]),
                ..Default::default()
            },
        )],
    );
    let document = codec::to_xml_string(&query, "Q1").unwrap();
    let (_, decoded) = codec::parse_xml_str(&document).unwrap();
    assert_eq!(decoded, query);
}

#[test]
fn test_write_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // no directory part
    Payload::from("bare").write_file("bare.txt").unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("bare.txt")).unwrap(), "bare");

    // current directory prefix
    Payload::from("dot").write_file("./dot.txt").unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("dot.txt")).unwrap(), "dot");

    // relative directory is created
    Payload::from("nested").write_file("./out/nested.txt").unwrap();
    assert_eq!(fs::read_to_string(dir.path().join("out/nested.txt")).unwrap(), "nested");
}
