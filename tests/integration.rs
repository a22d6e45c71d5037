//! Integration tests over real transcript fixtures.

use chatarchive::prelude::*;
use chrono::{TimeZone, Utc};
use std::path::Path;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn pt_document() -> ArchiveDocument {
    convert_file(
        Path::new(&fixture("conversa_pt.txt")),
        &ArchiveConfig::default(),
    )
    .unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_pt_fixture() {
    let parser = WhatsAppParser::new().unwrap();
    let messages = parser.parse(Path::new(&fixture("conversa_pt.txt"))).unwrap();

    assert_eq!(messages.len(), 12);
    assert_eq!(messages[0].sender, "System");
    assert!(messages[0].body.starts_with("As mensagens"));
    assert_eq!(messages[1].body, "Ana criou o grupo \"Viagem\"");
    assert_eq!(messages[2].sender, "Ana");
    assert_eq!(
        messages[2].timestamp,
        Utc.with_ymd_and_hms(2020, 1, 1, 10, 1, 0).unwrap()
    );
    // Trailing whitespace of continuation lines is trimmed
    assert_eq!(messages[4].body, "Eu!\nLevo o violão\ne a barraca");
}

#[test]
fn test_parse_bracketed_fixture() {
    let parser = WhatsAppParser::new().unwrap();
    let messages = parser
        .parse(Path::new(&fixture("conversa_ios.txt")))
        .unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(
        messages[0].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap()
    );
    assert_eq!(messages[2].body, "Tudo certo?\nSegunda linha");
}

#[test]
fn test_malformed_fixture_is_fatal() {
    let parser = WhatsAppParser::new().unwrap();
    let err = parser
        .parse(Path::new(&fixture("malformed_first_line.txt")))
        .unwrap_err();

    assert!(err.is_malformed_input());
    assert_eq!(err.line_number(), Some(1));
    assert!(err.to_string().contains("hello, this has no header"));
}

#[test]
fn test_parser_is_usable_as_trait_object() {
    let parser: Box<dyn Parser> = Box::new(WhatsAppParser::new().unwrap());
    assert_eq!(parser.name(), "WhatsApp");
    let messages = parser
        .parse_str("1/1/20, 10:00 AM - Alice: Hi there\n1/1/20, 10:01 AM - Bob: Hello!")
        .unwrap();
    assert_eq!(messages.len(), 2);
}

// =============================================================================
// Grouping and palette
// =============================================================================

#[test]
fn test_groups_keep_non_adjacent_runs_apart() {
    let doc = pt_document();
    let shape: Vec<_> = doc
        .groups
        .iter()
        .map(|g| (g.sender.as_str(), g.messages.len()))
        .collect();

    assert_eq!(
        shape,
        [
            ("System", 2),
            ("Ana", 2),
            ("Bruno", 2),
            ("Ana", 1),
            ("Carla", 2),
            ("Bruno", 1),
            ("Ana", 2),
        ]
    );
}

#[test]
fn test_sides_with_more_than_three_senders() {
    let doc = pt_document();
    let sides: Vec<_> = doc.groups.iter().map(|g| doc.side_of(g)).collect();
    assert_eq!(sides[0], Side::Center);
    assert!(sides[1..].iter().all(|&s| s == Side::Left));
}

#[test]
fn test_palette_first_seen_order() {
    let doc = pt_document();
    let senders: Vec<_> = doc.palette.iter().map(|e| e.sender.as_str()).collect();
    assert_eq!(senders, ["System", "Ana", "Bruno", "Carla"]);
}

#[test]
fn test_palette_identical_across_runs() {
    let first = pt_document();
    let second = pt_document();
    assert_eq!(first.palette.entries(), second.palette.entries());
}

#[test]
fn test_groups_flatten_to_conversation() {
    let parser = WhatsAppParser::new().unwrap();
    let conversation = parser.parse(Path::new(&fixture("conversa_pt.txt"))).unwrap();
    assert_eq!(pt_document().into_conversation(), conversation);
}

// =============================================================================
// Media classification
// =============================================================================

#[test]
fn test_media_categories_of_fixture() {
    let doc = pt_document();
    let labels: Vec<_> = doc.messages().map(|m| doc.classify(m).label()).collect();

    assert_eq!(
        labels,
        [
            "plain_text",
            "plain_text",
            "plain_text",
            "plain_text",
            "plain_text",
            "image",
            "audio",
            "location_share",
            "generic_file",
            "missed_call",
            "video",
            "plain_text",
        ]
    );
}

#[test]
fn test_media_details_of_fixture() {
    let doc = pt_document();
    let categories: Vec<_> = doc.messages().map(|m| doc.classify(m)).collect();

    assert_eq!(
        categories[5],
        MediaCategory::Image {
            filename: "IMG-20200101-WA0001.jpg".into()
        }
    );
    assert_eq!(
        categories[7],
        MediaCategory::LocationShare {
            coords: "https://maps.google.com/?q=-23.55,-46.63".into()
        }
    );
    assert_eq!(
        categories[8],
        MediaCategory::GenericFile {
            filename: "roteiro.pdf".into(),
            display_text: "Roteiro da viagem".into(),
        }
    );
    assert_eq!(
        doc.media_path(&categories[6]).as_deref(),
        Some("./Midias/PTT-20200101-WA0002.opus")
    );
}

#[test]
fn test_stats_of_fixture() {
    let stats = pt_document().stats;

    assert_eq!(stats.message_count, 12);
    assert_eq!(stats.group_count, 7);
    assert_eq!(stats.sender_count, 4);
    assert_eq!(stats.system_message_count, 2);
    assert_eq!(stats.media.plain_text, 6);
    assert_eq!(stats.media.attachments(), 4);
    assert_eq!(stats.media.total(), 12);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_custom_config_changes_system_sender_and_media_dir() {
    let config = ArchiveConfig::new()
        .with_parser(ParserConfig::new().with_system_sender("WhatsApp"))
        .with_media(MediaConfig::new().with_media_dir("media"));
    let doc = convert_file(Path::new(&fixture("conversa_pt.txt")), &config).unwrap();

    assert_eq!(doc.groups[0].sender, "WhatsApp");
    assert_eq!(doc.stats.system_message_count, 2);
    let image = doc.messages().nth(5).unwrap();
    assert_eq!(
        doc.media_path(&doc.classify(image)).as_deref(),
        Some("media/IMG-20200101-WA0001.jpg")
    );
}

#[test]
fn test_english_markers_via_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("en.json");
    std::fs::write(
        &config_path,
        r#"{
  "media": {
    "missed_call_notices": ["Missed voice call"],
    "location_marker": "location:",
    "attachment_marker": "(file attached)"
  }
}"#,
    )
    .unwrap();
    let config = ArchiveConfig::from_json_file(&config_path).unwrap();

    let doc = convert_str(
        "1/1/20, 10:00 AM - Ann: IMG-1.jpg (file attached)\n1/1/20, 10:01 AM - Ben: Missed voice call",
        SourceInfo::named("en.txt"),
        &config,
    )
    .unwrap();
    let labels: Vec<_> = doc.messages().map(|m| doc.classify(m).label()).collect();
    assert_eq!(labels, ["image", "missed_call"]);
}

#[test]
fn test_source_info_of_file() {
    let doc = pt_document();
    assert_eq!(doc.source.basename, "conversa_pt.txt");
    assert!(Path::new(&doc.source.full_path).is_absolute());
}
