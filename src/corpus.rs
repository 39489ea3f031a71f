//! Corpus data model: triples and records.
//!
//! The persisted corpus is a line-delimited JSON log, one record per line,
//! using the wire field names of the upstream extraction format
//! (`sentText`, `relationMentions`, `em1Text`, `em2Text`, `label`, spans).
//! Records are immutable once loaded; the record `id` is the join key used by
//! every index and is assigned by position at load time.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, CorpusResult};

/// A (subject, relation label, object) extraction from one sentence.
///
/// Token spans are absent until the triple has passed validation; a span of
/// `[0, 0]` may be a best-effort placeholder when the entity was found as a
/// literal substring but could not be aligned to token boundaries, so callers
/// must not rely on span precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    /// Subject surface text.
    #[serde(rename = "em1Text")]
    pub subject: String,
    /// Object surface text.
    #[serde(rename = "em2Text")]
    pub object: String,
    /// Relation label. Open vocabulary: pattern labels and schema-declared
    /// relation names both appear here.
    pub label: String,
    /// First token index of the subject in the segmented sentence.
    #[serde(rename = "em1Start", default, skip_serializing_if = "Option::is_none")]
    pub subject_start: Option<usize>,
    /// Last token index (inclusive) of the subject.
    #[serde(rename = "em1End", default, skip_serializing_if = "Option::is_none")]
    pub subject_end: Option<usize>,
    /// First token index of the object in the segmented sentence.
    #[serde(rename = "em2Start", default, skip_serializing_if = "Option::is_none")]
    pub object_start: Option<usize>,
    /// Last token index (inclusive) of the object.
    #[serde(rename = "em2End", default, skip_serializing_if = "Option::is_none")]
    pub object_end: Option<usize>,
}

impl Triple {
    /// Create an unvalidated triple (no spans).
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            label: label.into(),
            subject_start: None,
            subject_end: None,
            object_start: None,
            object_end: None,
        }
    }

    /// Whether both subject and object carry token spans.
    pub fn is_validated(&self) -> bool {
        self.subject_start.is_some()
            && self.subject_end.is_some()
            && self.object_start.is_some()
            && self.object_end.is_some()
    }
}

/// One corpus sentence plus its extracted triples.
///
/// A record with an empty triple list is retained for completeness but
/// contributes nothing to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 0-based position in the corpus stream. Reassigned at load time.
    #[serde(default)]
    pub id: u32,
    /// The source sentence.
    #[serde(rename = "sentText")]
    pub sentence: String,
    /// Extracted relation mentions, in extraction order.
    #[serde(rename = "relationMentions", default)]
    pub triples: Vec<Triple>,
}

impl Record {
    pub fn new(id: u32, sentence: impl Into<String>, triples: Vec<Triple>) -> Self {
        Self {
            id,
            sentence: sentence.into(),
            triples,
        }
    }
}

/// Write records as line-delimited JSON to `path`, one record per line.
pub fn write_records(path: &Path, records: &[Record]) -> CorpusResult<()> {
    let io_err = |source| CorpusError::Write {
        path: path.display().to_string(),
        source,
    };
    let file = std::fs::File::create(path).map_err(io_err)?;
    let mut writer = std::io::BufWriter::new(file);
    for record in records {
        // serde_json writes to the buffer; only I/O can fail here.
        let line = serde_json::to_string(record).map_err(|e| CorpusError::Write {
            path: path.display().to_string(),
            source: std::io::Error::other(e),
        })?;
        writeln!(writer, "{line}").map_err(io_err)?;
    }
    writer.flush().map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_wire_field_names() {
        let t = Triple::new("胜利油田", "CO2封存技术", "技术应用");
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"em1Text\""));
        assert!(json.contains("\"em2Text\""));
        assert!(json.contains("\"label\""));
        // Spans absent until validated.
        assert!(!json.contains("em1Start"));
    }

    #[test]
    fn record_round_trips_through_wire_format() {
        let record = Record::new(
            7,
            "中石油在大庆油田应用CO2封存技术",
            vec![Triple::new("中石油", "CO2封存技术", "技术应用")],
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn record_parses_without_id_or_mentions() {
        let record: Record = serde_json::from_str(r#"{"sentText": "一句话"}"#).unwrap();
        assert_eq!(record.id, 0);
        assert!(record.triples.is_empty());
    }

    #[test]
    fn validated_flag_requires_both_spans() {
        let mut t = Triple::new("a技术", "b项目", "应用");
        assert!(!t.is_validated());
        t.subject_start = Some(0);
        t.subject_end = Some(1);
        assert!(!t.is_validated());
        t.object_start = Some(2);
        t.object_end = Some(2);
        assert!(t.is_validated());
    }

    #[test]
    fn write_records_emits_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kg.jsonl");
        let records = vec![
            Record::new(0, "第一句", vec![]),
            Record::new(1, "第二句", vec![Triple::new("实体甲", "实体乙", "关系")]),
        ];
        write_records(&path, &records).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
