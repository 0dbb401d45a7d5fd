use std::fs;
use std::io::Write;

use colloquy::intent::{
    IntentSet, load_intents, load_table, parse_intents, try_load_intents, try_load_table,
};
use tempfile::{NamedTempFile, tempdir};

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID: &str = r#"{
    "intents": [
        {"tag": "greeting", "patterns": ["hello", "hi there"], "responses": ["Hi!"]},
        {"tag": "bye", "patterns": ["goodbye", "see you"], "responses": ["Bye!"]},
        {"tag": "greeting", "patterns": ["hey"], "responses": ["Hey!"]}
    ]
}"#;

#[test]
fn test_load_valid_file() {
    let file = write_temp(VALID);
    let intents = load_intents(file.path());
    assert_eq!(intents.len(), 3);
    assert_eq!(intents[0].tag, "greeting");
    assert_eq!(intents[1].patterns, vec!["goodbye", "see you"]);

    let strict = try_load_intents(file.path()).unwrap();
    assert_eq!(strict, intents);
}

#[test]
fn test_duplicate_tags_merge() {
    let set = IntentSet::new(parse_intents(VALID));
    assert_eq!(set.len(), 2);
    assert_eq!(set.pattern_count(), 5);

    let greeting = set.get("greeting").unwrap();
    assert_eq!(greeting.patterns, vec!["hello", "hi there", "hey"]);
    assert_eq!(greeting.responses, vec!["Hi!", "Hey!"]);
    assert_eq!(set.training_examples().len(), 5);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");
    assert!(load_intents(&path).is_empty());
    assert!(try_load_intents(&path).is_err());
}

#[test]
fn test_malformed_documents() {
    let cases = [
        "not json at all",
        "{\"intents\": [",
        "{\"data\": []}",
        "{\"intents\": {\"tag\": \"x\"}}",
        "{\"intents\": [{\"tag\": \"x\", \"patterns\": [\"a\"]}]}",
        "{\"intents\": [{\"tag\": \"\", \"patterns\": [], \"responses\": []}]}",
        "{\"intents\": [42]}",
    ];

    for content in cases {
        let file = write_temp(content);
        assert!(load_intents(file.path()).is_empty(), "accepted {content:?}");
        assert!(try_load_intents(file.path()).is_err(), "accepted {content:?}");
    }
}

#[test]
fn test_empty_intents_list() {
    let file = write_temp("{\"intents\": []}");
    assert!(load_intents(file.path()).is_empty());
    assert!(try_load_intents(file.path()).unwrap().is_empty());
}

#[test]
fn test_load_table() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.json");
    fs::write(
        &path,
        r#"{"table": [{"seats": 120, "course": "B.Tech"}, {"seats": 60, "course": "MBA"}]}"#,
    )
    .unwrap();

    let table = load_table(&path);
    assert_eq!(table.len(), 2);
    assert_eq!(table.columns(), vec!["seats", "course"]);
    assert_eq!(table.rows()[1]["course"], "MBA");

    fs::write(&path, r#"{"table": [1, 2]}"#).unwrap();
    assert!(load_table(&path).is_empty());
    assert!(try_load_table(&path).is_err());

    fs::write(&path, r#"{"rows": []}"#).unwrap();
    assert!(load_table(&path).is_empty());

    assert!(load_table(dir.path().join("missing.json")).is_empty());
}
