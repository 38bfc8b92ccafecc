//! Document parsing feeding the tally engines, and digest stability.

use assert_json_diff::assert_json_eq;
use serde_json::json;

use vc_io::loader::election_document_to_value;
use vc_io::{parse_election_document, sha256_canonical};

const DOC: &str = r#"{
    "title": "Board seat",
    "createdAt": 1700000000000,
    "candidates": [{"id": "1", "name": "C1"}, {"id": "2", "name": "C2"}],
    "votes": [
        {"voterName": "a", "ranking": ["1", "2"], "approved": ["1"], "timestamp": 10},
        {"voterName": "b", "ranking": ["2"], "approved": ["2", "1"], "timestamp": 11}
    ]
}"#;

#[test]
fn document_round_trips_to_stored_shape() {
    let doc = parse_election_document(DOC).unwrap();
    let v = election_document_to_value(&doc).unwrap();
    assert_json_eq!(
        v,
        json!({
            "title": "Board seat",
            "createdAt": 1700000000000i64,
            "candidates": [{"id": "1", "name": "C1"}, {"id": "2", "name": "C2"}],
            "votes": [
                {"voterName": "a", "ranking": ["1", "2"], "approved": ["1"], "timestamp": 10},
                {"voterName": "b", "ranking": ["2"], "approved": ["1", "2"], "timestamp": 11}
            ]
        })
    );
}

#[test]
fn digest_is_stable_across_reparse() {
    let a = parse_election_document(DOC).unwrap();
    let b = parse_election_document(&serde_json::to_string(&a).unwrap()).unwrap();
    assert_eq!(a, b);
    assert_eq!(sha256_canonical(&a).unwrap(), sha256_canonical(&b).unwrap());
}
