//! Overlay item records and the legacy annotation formats they are built from.

use super::OverlayError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// Rectangle in annotation-source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Kind of document feature an item marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Line,
    OcrText,
    Equipment,
    CorrosionLoop,
}

/// One annotation shape keyed to document coordinates.
///
/// Only `color` is ever rewritten after construction, by the group colour pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// 1-based page; `None` shows the item on every page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl OverlayItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates,
            item_type: None,
            group_id: None,
            color: None,
            page: None,
            metadata: None,
        }
    }

    pub fn with_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Group the item belongs to; an empty id counts as no group.
    pub fn group(&self) -> Option<&str> {
        self.group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn on_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Normalizes a legacy annotation record.
    ///
    /// The id is stringified and the original value is kept in
    /// `metadata.originalId`.
    pub fn from_legacy(record: &LegacyAnnotation, item_type: ItemType) -> Self {
        let mut metadata = serde_json::Map::new();
        metadata.insert("originalId".to_string(), record.id.to_value());

        Self {
            id: record.id.to_string(),
            name: record.text.clone(),
            coordinates: Coordinates::new(
                record.x_coord,
                record.y_coord,
                record.width,
                record.height,
            ),
            item_type: Some(item_type),
            group_id: None,
            color: None,
            page: record.page,
            metadata: Some(Value::Object(metadata)),
        }
    }
}

/// Annotation id as delivered by the source: numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationId {
    Number(serde_json::Number),
    Text(String),
}

impl AnnotationId {
    fn to_value(&self) -> Value {
        match self {
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Page-scoped annotation record in the source's reference resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyAnnotation {
    pub id: AnnotationId,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default, alias = "name")]
    pub text: String,
    pub x_coord: f64,
    pub y_coord: f64,
    pub width: f64,
    pub height: f64,
}

pub fn convert_legacy_annotations(
    records: &[LegacyAnnotation],
    item_type: ItemType,
) -> Vec<OverlayItem> {
    records
        .iter()
        .map(|record| OverlayItem::from_legacy(record, item_type))
        .collect()
}

/// Shapes an annotation file may take on disk.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnnotationPayload {
    Items(Vec<OverlayItem>),
    Legacy(Vec<LegacyAnnotation>),
    Document {
        #[serde(default)]
        line_numbers: Vec<LegacyAnnotation>,
        #[serde(default)]
        ocr_results: Vec<LegacyAnnotation>,
    },
}

/// Parses annotation JSON into overlay items.
///
/// Accepts an array of overlay items, an array of legacy records (tagged
/// with `legacy_type`), or a document payload with `line_numbers` and
/// `ocr_results` arrays, which become `line` and `ocr_text` items.
pub fn parse_annotations(
    json: &str,
    legacy_type: ItemType,
) -> Result<Vec<OverlayItem>, OverlayError> {
    let payload: AnnotationPayload = serde_json::from_str(json)?;
    let items = match payload {
        AnnotationPayload::Items(items) => items,
        AnnotationPayload::Legacy(records) => convert_legacy_annotations(&records, legacy_type),
        AnnotationPayload::Document {
            line_numbers,
            ocr_results,
        } => {
            debug!(
                "Document payload: {} line number(s), {} OCR result(s)",
                line_numbers.len(),
                ocr_results.len()
            );
            let mut items = convert_legacy_annotations(&line_numbers, ItemType::Line);
            items.extend(convert_legacy_annotations(&ocr_results, ItemType::OcrText));
            items
        }
    };
    Ok(items)
}

/// Reads and parses an annotation file. See [`parse_annotations`].
pub fn load_annotations(
    path: &Path,
    legacy_type: ItemType,
) -> Result<Vec<OverlayItem>, OverlayError> {
    let json = fs::read_to_string(path).map_err(|source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_annotations(&json, legacy_type)?;
    info!("Loaded {} overlay item(s) from {}", items.len(), path.display());
    Ok(items)
}
