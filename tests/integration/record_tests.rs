//! Record processing tests through the public library API

use dc_indexer::dc::{DcRecord, DcTag};
use dc_indexer::DcError;

const RECORD: &str = r#"<dc>
  <recordID>rec-001</recordID>
  <title>Kalevala : runoja.</title>
  <creator>Lönnrot, Elias,</creator>
  <contributor>Gallen-Kallela, Akseli</contributor>
  <subject>Kansanrunous.</subject>
  <identifier>951-1-08543-3</identifier>
  <identifier>978-951-1-08543-0</identifier>
  <date>1985</date>
  <language>fin</language>
  <type>Book</type>
</dc>"#;

fn articles() -> Vec<String> {
    vec!["the ".to_string(), "a ".to_string()]
}

#[test]
fn test_id_is_never_empty() {
    for (data, oai_id) in [
        (RECORD, ""),
        ("<dc><title>T</title></dc>", "oai:src:abc"),
        ("<dc><recordID></recordID></dc>", "oai:src:xyz"),
    ] {
        let record = DcRecord::new(data, oai_id, "src").unwrap();
        assert!(!record.id().is_empty());
    }
}

#[test]
fn test_embedded_id_wins_over_origin() {
    let record = DcRecord::new(RECORD, "oai:src:other", "src").unwrap();
    assert_eq!(record.id(), "rec-001");
    assert_eq!(record.values(DcTag::RecordId).len(), 1);
}

#[test]
fn test_export_round_trip() {
    let record = DcRecord::new(RECORD, "", "src").unwrap();
    let fields = record.to_index_fields(&articles());

    for export in [record.to_xml(), record.serialize()] {
        let reparsed = DcRecord::new(&export, "", "src").unwrap();
        assert_eq!(reparsed.id(), record.id());

        let mut reparsed_fields = reparsed.to_index_fields(&articles());
        let mut original_fields = fields.clone();
        reparsed_fields.set("fullrecord", "");
        original_fields.set("fullrecord", "");
        assert_eq!(reparsed_fields, original_fields);
    }
}

#[test]
fn test_full_field_set() {
    let record = DcRecord::new(RECORD, "", "src").unwrap();
    let fields = record.to_index_fields(&articles());

    assert_eq!(fields.single("title_short"), Some("Kalevala"));
    assert_eq!(fields.single("title_sub"), Some("runoja"));
    assert_eq!(fields.single("title_sort"), Some("kalevala : runoja"));
    assert_eq!(fields.single("author"), Some("Lönnrot, Elias"));
    assert_eq!(
        fields.multiple("author2"),
        Some(&["Gallen-Kallela, Akseli".to_string()][..])
    );
    assert_eq!(fields.multiple("topic"), Some(&["Kansanrunous".to_string()][..]));
    assert_eq!(fields.multiple("isbn"), Some(&["9789511085430".to_string()][..]));
    assert_eq!(fields.single("format"), Some("Book"));
    assert_eq!(fields.single("publishDate"), Some("1985"));
    assert_eq!(fields.single("url"), Some(""));
}

#[test]
fn test_malformed_payload_is_surfaced() {
    assert!(matches!(
        DcRecord::new("<dc><title>", "oai:a:b", "src"),
        Err(DcError::MalformedInput(_))
    ));
}

#[test]
fn test_deeply_nested_payload_is_rejected() {
    let payload = format!(
        "<dc><title>T</title>{}{}</dc>",
        "<a>".repeat(20_000),
        "</a>".repeat(20_000)
    );
    assert!(matches!(
        DcRecord::new(&payload, "oai:a:b", "src"),
        Err(DcError::MalformedInput(_))
    ));
}
