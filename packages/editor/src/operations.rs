//! # Operations
//!
//! Structural edits requested by an external agent. The JSON form is the
//! interchange schema: a `type` tag plus the fields of that edit.
//!
//! ```json
//! {"type": "add_heading", "text": "Risks", "level": 2, "after_paragraph_id": "p-1f2e3d4c"}
//! {"type": "replace_text", "find": "ACME", "replace": "Acme Corp"}
//! {"type": "insert_table", "after_paragraph_id": "h2-0a0b0c0d", "data": [["a", "b"]]}
//! ```
//!
//! Content-adding edits without `after_paragraph_id` append to the end of the
//! document. Table edits address tables by their index in document order.

use crate::AnchorId;
use docanchor_host::TableSpec;
use serde::{Deserialize, Serialize};

/// Rows/cols used when neither explicit nor inferable from data
pub const DEFAULT_TABLE_DIMENSION: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    AddHeading {
        #[serde(default)]
        text: String,
        /// Clamped into 1..=6; missing means 1
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after_paragraph_id: Option<AnchorId>,
    },

    AddParagraph {
        #[serde(default)]
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after_paragraph_id: Option<AnchorId>,
    },

    /// Case-insensitive replacement of every occurrence of `find`; an empty
    /// `find` matches nothing
    ReplaceText {
        #[serde(default)]
        find: String,
        #[serde(default)]
        replace: String,
    },

    InsertTable {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after_paragraph_id: Option<AnchorId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rows: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cols: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Vec<Vec<String>>>,
        #[serde(default)]
        add_header_row: bool,
    },

    /// Overwrite the cells of a table that `data` covers
    EditTable {
        table_index: usize,
        data: Vec<Vec<String>>,
    },

    EditCell {
        table_index: usize,
        cell_row: usize,
        cell_col: usize,
        cell_text: String,
    },

    RemoveTable {
        table_index: usize,
    },

    /// Remove the paragraph marked `paragraph_id`, or every paragraph
    /// containing `find`
    RemoveParagraph {
        #[serde(default, alias = "after_paragraph_id", skip_serializing_if = "Option::is_none")]
        paragraph_id: Option<AnchorId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        find: Option<String>,
    },
}

impl Operation {
    /// Tag name, as it appears in the `type` field
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::AddHeading { .. } => "add_heading",
            Operation::AddParagraph { .. } => "add_paragraph",
            Operation::ReplaceText { .. } => "replace_text",
            Operation::InsertTable { .. } => "insert_table",
            Operation::EditTable { .. } => "edit_table",
            Operation::EditCell { .. } => "edit_cell",
            Operation::RemoveTable { .. } => "remove_table",
            Operation::RemoveParagraph { .. } => "remove_paragraph",
        }
    }

    /// Anchor this operation is addressed by, if any
    pub fn anchor(&self) -> Option<&AnchorId> {
        match self {
            Operation::AddHeading { after_paragraph_id, .. }
            | Operation::AddParagraph { after_paragraph_id, .. }
            | Operation::InsertTable { after_paragraph_id, .. } => after_paragraph_id.as_ref(),
            Operation::RemoveParagraph { paragraph_id, .. } => paragraph_id.as_ref(),
            _ => None,
        }
    }
}

/// Heading level clamped into 1..=6 (missing means 1)
pub fn clamp_heading_level(level: Option<i64>) -> u8 {
    // In range after the clamp, so the cast is lossless
    level.unwrap_or(1).clamp(1, 6) as u8
}

/// Table shape: explicit non-zero `rows`/`cols` win, otherwise inferred from
/// `data` (row count, widest row), otherwise [`DEFAULT_TABLE_DIMENSION`]
pub fn table_spec(
    rows: Option<usize>,
    cols: Option<usize>,
    data: Option<&[Vec<String>]>,
    header_row: bool,
) -> TableSpec {
    let data = data.unwrap_or_default();
    let inferred_rows = Some(data.len());
    let inferred_cols = data.iter().map(Vec::len).max();

    let pick = |explicit: Option<usize>, inferred: Option<usize>| {
        explicit
            .filter(|n| *n > 0)
            .or(inferred.filter(|n| *n > 0))
            .unwrap_or(DEFAULT_TABLE_DIMENSION)
    };

    TableSpec {
        rows: pick(rows, inferred_rows),
        cols: pick(cols, inferred_cols),
        data: data.to_vec(),
        header_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interchange_batch() {
        let json = r#"[
            {"type": "add_heading", "text": "Risks", "level": 2, "after_paragraph_id": "p-1f2e3d4c"},
            {"type": "add_paragraph", "text": "Body"},
            {"type": "replace_text", "find": "ACME", "replace": "Acme"},
            {"type": "insert_table", "after_paragraph_id": "h2-0a0b0c0d", "data": [["a", "b"]], "add_header_row": true},
            {"type": "edit_table", "table_index": 0, "data": [["x"]]},
            {"type": "edit_cell", "table_index": 1, "cell_row": 0, "cell_col": 2, "cell_text": "z"},
            {"type": "remove_table", "table_index": 3},
            {"type": "remove_paragraph", "after_paragraph_id": "p-00000001"}
        ]"#;

        let ops: Vec<Operation> = serde_json::from_str(json).unwrap();
        let kinds: Vec<&str> = ops.iter().map(Operation::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "add_heading",
                "add_paragraph",
                "replace_text",
                "insert_table",
                "edit_table",
                "edit_cell",
                "remove_table",
                "remove_paragraph"
            ]
        );
        assert_eq!(ops[0].anchor().map(AnchorId::as_str), Some("p-1f2e3d4c"));
        assert_eq!(ops[1].anchor(), None);
        assert_eq!(ops[7].anchor().map(AnchorId::as_str), Some("p-00000001"));
    }

    #[test]
    fn test_kind_matches_serialized_tag() {
        let op = Operation::RemoveTable { table_index: 1 };
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["type"], op.kind());
    }

    #[test]
    fn test_missing_text_and_find_default_to_empty() {
        let ops: Vec<Operation> = serde_json::from_str(
            r#"[{"type": "add_heading", "level": 2}, {"type": "add_paragraph"}, {"type": "replace_text"}]"#,
        )
        .unwrap();

        assert_eq!(
            ops,
            vec![
                Operation::AddHeading {
                    text: String::new(),
                    level: Some(2),
                    after_paragraph_id: None,
                },
                Operation::AddParagraph {
                    text: String::new(),
                    after_paragraph_id: None,
                },
                Operation::ReplaceText {
                    find: String::new(),
                    replace: String::new(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let result: Result<Operation, _> = serde_json::from_str(r#"{"type": "edit_cell", "table_index": 0}"#);
        assert!(result.is_err());

        let result: Result<Operation, _> = serde_json::from_str(r#"{"type": "explode"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_clamp_heading_level() {
        assert_eq!(clamp_heading_level(Some(9)), 6);
        assert_eq!(clamp_heading_level(Some(0)), 1);
        assert_eq!(clamp_heading_level(Some(-4)), 1);
        assert_eq!(clamp_heading_level(Some(3)), 3);
        assert_eq!(clamp_heading_level(None), 1);
    }

    #[test]
    fn test_table_spec_inference() {
        let data = vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]];

        let spec = table_spec(None, None, Some(data.as_slice()), false);
        assert_eq!((spec.rows, spec.cols), (2, 2));

        let spec = table_spec(Some(4), Some(0), Some(data.as_slice()), false);
        assert_eq!((spec.rows, spec.cols), (4, 2));

        let spec = table_spec(None, None, None, true);
        assert_eq!((spec.rows, spec.cols), (2, 2));
        assert!(spec.header_row);

        let empty_rows: Vec<Vec<String>> = vec![vec![], vec![]];
        let spec = table_spec(None, None, Some(empty_rows.as_slice()), false);
        assert_eq!((spec.rows, spec.cols), (2, 2));
    }
}
