use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{Result, TaxonavError};
use crate::models::{FieldValue, MetadataRecord};

/// A post split into its metadata record and remaining body text.
#[derive(Debug, Clone)]
pub struct ParsedPost {
    pub record: MetadataRecord,
    pub body: String,
}

/// Splits a raw post into its leading `---` frontmatter block and body.
///
/// The block must open on the first line (after an optional BOM) and
/// close with a line that is exactly `---`. An unterminated block is not
/// treated as frontmatter; the whole input becomes the body.
#[must_use]
pub fn split_frontmatter(raw: &str) -> (Option<&str>, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(after_open) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let block = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(block), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Parses one post into a `MetadataRecord` plus body.
///
/// YAML decoding failures and non-mapping frontmatter are parse errors
/// (the caller decides whether to skip the post). Taxonomy fields are
/// lifted into `FieldValue` without coercion so shape violations surface
/// later, at index build.
pub fn parse(source_id: impl Into<String>, raw: &str) -> Result<ParsedPost> {
    let source_id = source_id.into();
    let (block, body) = split_frontmatter(raw);
    let mut record = MetadataRecord::new(&source_id);

    if let Some(block) = block
        && !block.trim().is_empty()
    {
        let value: Value = serde_norway::from_str(block)
            .map_err(|e| TaxonavError::Frontmatter(format!("{source_id}: {e}")))?;
        let Value::Object(mut fields) = value else {
            return Err(TaxonavError::Validation(format!(
                "frontmatter of {source_id} is not a key/value mapping"
            )));
        };

        record.categories = lift_field(fields.remove("categories"));
        record.tags = lift_field(fields.remove("tags"));
        record.date = fields.remove("date").as_ref().and_then(parse_post_date);
        record.extra = fields;
    }

    Ok(ParsedPost {
        record,
        body: body.to_string(),
    })
}

fn lift_field(value: Option<Value>) -> FieldValue {
    match value {
        None | Some(Value::Null) => FieldValue::Absent,
        Some(Value::String(one)) => FieldValue::Scalar(one),
        Some(Value::Array(items)) => {
            if items.iter().all(Value::is_string) {
                FieldValue::List(
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(ToString::to_string))
                        .collect(),
                )
            } else {
                FieldValue::Other(Value::Array(items))
            }
        }
        Some(other) => FieldValue::Other(other),
    }
}

/// Lenient post-date parsing: RFC 3339, `YYYY-MM-DD HH:MM:SS`, or a bare
/// date. Anything else is ignored; the date is passthrough metadata, not
/// part of the indexing contract.
fn parse_post_date(value: &Value) -> Option<DateTime<Utc>> {
    let raw = value.as_str()?.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn split_returns_block_and_body() {
        let (block, body) = split_frontmatter("---\ntitle: hi\n---\nbody text\n");
        assert_eq!(block, Some("title: hi\n"));
        assert_eq!(body, "body text\n");
    }

    #[test]
    fn split_tolerates_leading_bom() {
        let (block, body) = split_frontmatter("\u{feff}---\ntags: rust\n---\nbody");
        assert_eq!(block, Some("tags: rust\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn split_without_block_returns_whole_input_as_body() {
        let (block, body) = split_frontmatter("# Just a heading\n\ntext");
        assert_eq!(block, None);
        assert_eq!(body, "# Just a heading\n\ntext");
    }

    #[test]
    fn split_treats_unterminated_block_as_body() {
        let raw = "---\ntitle: never closed\nbody keeps going";
        let (block, body) = split_frontmatter(raw);
        assert_eq!(block, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn parse_lifts_scalar_and_list_taxonomy_fields() {
        let raw = "---\ncategories: tech\ntags: [rust, cli]\n---\nbody";
        let parsed = parse("p1.md", raw).expect("parse");

        assert_eq!(
            parsed.record.categories,
            FieldValue::Scalar("tech".to_string())
        );
        assert_eq!(
            parsed.record.tags,
            FieldValue::List(vec!["rust".to_string(), "cli".to_string()])
        );
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn parse_keeps_unknown_keys_in_extra() {
        let raw = "---\ntitle: Hello\nlayout: post\n---\n";
        let parsed = parse("p1.md", raw).expect("parse");

        assert_eq!(
            parsed.record.extra.get("title").and_then(Value::as_str),
            Some("Hello")
        );
        assert_eq!(
            parsed.record.extra.get("layout").and_then(Value::as_str),
            Some("post")
        );
        assert!(parsed.record.categories.is_absent());
    }

    #[test]
    fn parse_preserves_wrong_shapes_for_the_indexer_to_reject() {
        let raw = "---\ncategories: 42\n---\n";
        let parsed = parse("p1.md", raw).expect("parse itself must not fail");
        assert!(matches!(parsed.record.categories, FieldValue::Other(_)));
        assert!(parsed.record.categories.as_terms().is_none());
    }

    #[test]
    fn parse_rejects_non_mapping_frontmatter() {
        let raw = "---\n- just\n- a list\n---\n";
        let err = parse("p1.md", raw).expect_err("must reject");
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn parse_surfaces_yaml_errors() {
        let raw = "---\ntags: [unclosed\n---\n";
        let err = parse("p1.md", raw).expect_err("must reject");
        assert_eq!(err.code(), "FRONTMATTER_ERROR");
        assert!(err.to_string().contains("p1.md"));
    }

    #[test]
    fn parse_reads_hexo_style_dates() {
        let raw = "---\ndate: 2023-04-01 09:30:00\n---\n";
        let parsed = parse("p1.md", raw).expect("parse");
        let date = parsed.record.date.expect("date");
        assert_eq!(date.hour(), 9);

        let raw = "---\ndate: 2023-04-01\n---\n";
        let parsed = parse("p2.md", raw).expect("parse");
        assert!(parsed.record.date.is_some());
    }

    #[test]
    fn parse_ignores_unreadable_dates() {
        let raw = "---\ndate: next tuesday\n---\n";
        let parsed = parse("p1.md", raw).expect("parse");
        assert!(parsed.record.date.is_none());
    }

    #[test]
    fn parse_of_empty_block_yields_bare_record() {
        let parsed = parse("p1.md", "---\n---\nbody").expect("parse");
        assert!(parsed.record.categories.is_absent());
        assert!(parsed.record.tags.is_absent());
        assert!(parsed.record.extra.is_empty());
        assert_eq!(parsed.body, "body");
    }
}
