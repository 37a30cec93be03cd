//! Raw option mapping → normalized [`MenuOptions`].
//!
//! Callers hand over loosely-typed values (strings from shortcode-like
//! frontends, numbers/bools/arrays from JSON callers). Recognized keys are
//! merged over their defaults, coerced, and sanitized; unrecognized keys
//! are ignored. Malformed values degrade to their defaults instead of
//! failing the render.

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::options::sanitize::{sanitize_class_list, sanitize_fragment, sanitize_tag_name};
use crate::taxonomy::TermId;

/// Raw option mapping as supplied by the caller.
pub type RawOptions = serde_json::Map<String, Value>;

/// Ordered recognized-option → default-value table. An extension may
/// register extra keys; values for those land in [`MenuOptions::extra`].
#[derive(Debug, Clone)]
pub struct OptionDefaults {
    entries: BTreeMap<String, Value>,
}

impl OptionDefaults {
    /// The base recognized set.
    pub fn base() -> Self {
        let defaults: &[(&str, Value)] = &[
            ("taxonomy", Value::from("category")),
            ("exclude", Value::Bool(false)),
            ("level", Value::from(2)),
            ("prnt_tag", Value::from("ul")),
            ("prnt_cls", Value::from("sub-menu")),
            ("chld_tag", Value::from("li")),
            ("chld_cls", Value::from("menu-item")),
            ("chld_chc", Value::from("menu-item-has-children")),
            ("chld_cid", Value::Bool(false)),
            ("a_cls", Value::Bool(false)),
            ("subi_bfr", Value::Bool(false)),
            ("subi_aft", Value::Bool(false)),
            ("nline", Value::from("\n")),
            ("linkget", Value::Bool(false)),
            ("hide_empty", Value::from(1)),
        ];
        let mut entries = BTreeMap::new();
        for (key, value) in defaults {
            entries.insert((*key).to_string(), value.clone());
        }
        Self { entries }
    }

    /// Register an option key with its default value.
    pub fn insert(&mut self, key: &str, default: Value) {
        self.entries.insert(key.to_string(), default);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once keys beyond the base recognized set have been registered.
    pub fn is_extended(&self) -> bool {
        self.entries.len() > Self::base().entries.len()
    }
}

/// Coerce a raw option value to a string. `false` and `null` read as unset.
pub fn value_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Coerce a raw option value to a flag. `"0"`, `"false"`, `""`, `0`, and
/// `null` are all false.
pub fn value_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false"),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Coerce a raw option value to a non-negative integer, falling back on
/// anything unparseable. `false` and `null` read as 0.
pub fn value_usize(value: &Value, fallback: usize) -> usize {
    match value {
        Value::Number(n) => n.as_u64().map_or(fallback, |n| n as usize),
        Value::String(s) => s.trim().parse().unwrap_or(fallback),
        Value::Bool(false) | Value::Null => 0,
        _ => fallback,
    }
}

/// Normalized, sanitized rendering configuration. Immutable per render call.
#[derive(Debug, Clone)]
pub struct MenuOptions {
    /// Record-source selector. Upstream concern; the renderer ignores it.
    pub taxonomy: String,
    /// Term ids to omit along with their entire subtrees.
    pub exclude: HashSet<TermId>,
    /// Maximum nesting depth, 1-based from the root level. `None` is
    /// unlimited.
    pub max_depth: Option<usize>,
    /// Children-wrapper tag name; empty means no wrapper is emitted.
    pub parent_tag: String,
    pub parent_class: String,
    /// Item tag name; empty means no item tag is emitted.
    pub child_tag: String,
    pub child_class: String,
    pub child_has_children_class: String,
    /// Append an `item-<id>` class per item.
    pub child_id_class: bool,
    /// Pre-rendered ` class="..."` attribute for anchors, or empty.
    pub link_class_attr: String,
    /// Sanitized fragment emitted before the anchor of an item that has
    /// rendered children.
    pub before_children: String,
    /// Sanitized fragment emitted after the anchor of an item that has
    /// rendered children.
    pub after_children: String,
    /// Appended after each emitted line; empty disables line breaks and
    /// indentation both.
    pub line_ending: String,
    /// Extra query string appended to every generated link.
    pub link_query: String,
    /// Upstream empty-term filter toggle.
    pub hide_empty: bool,
    /// Values for keys an extension added to the default set. The built-in
    /// renderer never reads these.
    pub extra: BTreeMap<String, Value>,
}

impl MenuOptions {
    /// Merge caller values over `defaults` and normalize. Recognized keys
    /// get the caller's value if present, the default otherwise;
    /// unrecognized caller keys vanish.
    pub fn from_raw(raw: &RawOptions, defaults: &OptionDefaults) -> MenuOptions {
        let mut merged: BTreeMap<&str, &Value> = BTreeMap::new();
        for (key, default) in &defaults.entries {
            merged.insert(key.as_str(), raw.get(key).unwrap_or(default));
        }

        let get_str = |key: &str| merged.get(key).map(|v| value_str(v)).unwrap_or_default();
        let get_bool = |key: &str| merged.get(key).map(|v| value_bool(v)).unwrap_or(false);

        let level = merged.get("level").map(|v| value_usize(v, 2)).unwrap_or(2);
        let link_class = sanitize_class_list(&get_str("a_cls"));

        let mut options = MenuOptions {
            taxonomy: get_str("taxonomy"),
            exclude: parse_exclude(merged.get("exclude").copied()),
            max_depth: if level == 0 { None } else { Some(level) },
            parent_tag: sanitize_tag_name(&get_str("prnt_tag")),
            parent_class: sanitize_class_list(&get_str("prnt_cls")),
            child_tag: sanitize_tag_name(&get_str("chld_tag")),
            child_class: sanitize_class_list(&get_str("chld_cls")),
            child_has_children_class: sanitize_class_list(&get_str("chld_chc")),
            child_id_class: get_bool("chld_cid"),
            link_class_attr: if link_class.is_empty() {
                String::new()
            } else {
                format!(" class=\"{}\"", link_class)
            },
            before_children: sanitize_fragment(&get_str("subi_bfr")),
            after_children: sanitize_fragment(&get_str("subi_aft")),
            line_ending: get_str("nline"),
            link_query: get_str("linkget"),
            hide_empty: get_bool("hide_empty"),
            extra: BTreeMap::new(),
        };

        let base = OptionDefaults::base();
        for (key, value) in &merged {
            if !base.entries.contains_key(*key) {
                options.extra.insert((*key).to_string(), (*value).clone());
            }
        }
        options
    }
}

/// The exclude list arrives as a comma-separated id string or a JSON array
/// of ids. Entries that parse as integers match integer ids; the rest are
/// compared as strings and simply never match anything else.
fn parse_exclude(value: Option<&Value>) -> HashSet<TermId> {
    let mut exclude = HashSet::new();
    match value {
        Some(Value::Array(entries)) => {
            for entry in entries {
                match entry {
                    Value::Number(n) => {
                        if let Some(n) = n.as_i64() {
                            exclude.insert(TermId::Int(n));
                        }
                    }
                    Value::String(s) if !s.trim().is_empty() => {
                        exclude.insert(TermId::parse(s));
                    }
                    _ => {}
                }
            }
        }
        Some(value) => {
            for entry in value_str(value).split(',') {
                if !entry.trim().is_empty() {
                    exclude.insert(TermId::parse(entry));
                }
            }
        }
        None => {}
    }
    exclude
}
