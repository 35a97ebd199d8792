//! Translation resource tree and flattening.

use serde_json::{
    Map,
    Value,
};

use super::table::EntryTable;

/// Default separator between flattened key segments.
pub const DEFAULT_KEY_SEPARATOR: &str = "_";

/// Parsed translation resource.
///
/// The array-vs-object decision is made once, when converting from JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
    /// Positional children, flattened with 1-based indices.
    Sequence(Vec<TranslationNode>),
    /// Named children in document order.
    Mapping(Vec<(String, TranslationNode)>),
    /// A translated string.
    Leaf(String),
    /// Anything that cannot hold text: numbers, booleans, null, holes.
    Absent,
}

impl TranslationNode {
    /// Number of string leaves reachable from this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
            Self::Mapping(entries) => entries.iter().map(|(_, node)| node.leaf_count()).sum(),
            Self::Leaf(_) => 1,
            Self::Absent => 0,
        }
    }
}

impl From<&Value> for TranslationNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Leaf(s.clone()),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from).collect()),
            Value::Object(map) => array_like_elements(map).map_or_else(
                || {
                    Self::Mapping(
                        map.iter().map(|(key, value)| (key.clone(), Self::from(value))).collect(),
                    )
                },
                Self::Sequence,
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Absent,
        }
    }
}

impl From<Value> for TranslationNode {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// Treats an object carrying a `length` property as array-like.
///
/// Elements are read from the keys `"0"`, `"1"`, ... up to `length`; missing
/// indices become [`TranslationNode::Absent`]. A fractional `length` covers
/// every index below it; one that is not a positive number yields no
/// elements. Returns `None` for ordinary objects.
fn array_like_elements(map: &Map<String, Value>) -> Option<Vec<TranslationNode>> {
    let declared = match map.get("length")? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(index_bound)).unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map_or(0, index_bound),
        Value::Bool(true) => 1,
        _ => 0,
    };

    // Indices past the highest one present are holes and add nothing.
    let present = map
        .keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .filter(|index| *index < declared)
        .max()
        .map_or(0, |max| max + 1);

    Some(
        (0..present)
            .map(|index| map.get(&index.to_string()).map_or(TranslationNode::Absent, TranslationNode::from))
            .collect(),
    )
}

/// Number of indices strictly below `length`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn index_bound(length: f64) -> u64 {
    if length.is_finite() && length > 0.0 { length.ceil() as u64 } else { 0 }
}

/// Flatten a translation tree into `table`.
///
/// Object keys are lower-cased; sequence positions are 1-based. Segments are
/// joined with `separator`. Returns the number of entries actually inserted,
/// so `0` means the resource contributed nothing.
pub fn flatten_into(
    table: &mut EntryTable,
    prefix: Option<&str>,
    node: &TranslationNode,
    separator: &str,
) -> usize {
    let child_key = |segment: &str| {
        prefix.filter(|p| !p.is_empty()).map_or_else(
            || segment.to_string(),
            |p| format!("{p}{separator}{segment}"),
        )
    };

    match node {
        TranslationNode::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let key = child_key(&(index + 1).to_string());
                flatten_child(table, &key, item, separator)
            })
            .sum(),
        TranslationNode::Mapping(entries) => entries
            .iter()
            .map(|(name, item)| {
                let key = child_key(&name.to_lowercase());
                flatten_child(table, &key, item, separator)
            })
            .sum(),
        TranslationNode::Leaf(_) => {
            tracing::debug!("Resource root is a bare string; nothing to key it by");
            0
        }
        TranslationNode::Absent => {
            tracing::debug!(prefix = ?prefix, "Skipping value without text");
            0
        }
    }
}

/// Inserts a leaf at `key`, or recurses with `key` as the prefix.
fn flatten_child(
    table: &mut EntryTable,
    key: &str,
    node: &TranslationNode,
    separator: &str,
) -> usize {
    match node {
        TranslationNode::Leaf(text) => table.insert(key, text),
        _ => flatten_into(table, Some(key), node, separator),
    }
}

/// Flatten a JSON value into a fresh table.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use talks_i18n::input::translation::flatten_json;
///
/// let json = json!({
///     "common": {
///         "hello": "Hello",
///         "items": ["one", "two"]
///     }
/// });
///
/// let table = flatten_json(&json, "_");
/// assert_eq!(table.get("common_hello"), Some("Hello"));
/// assert_eq!(table.get("common_items_2"), Some("two"));
/// ```
#[must_use]
pub fn flatten_json(json: &Value, separator: &str) -> EntryTable {
    let mut table = EntryTable::new();
    flatten_into(&mut table, None, &TranslationNode::from(json), separator);
    table
}
