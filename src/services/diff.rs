use std::collections::BTreeSet;

use serde_json::Value;

/// Result of comparing two payload trees.
///
/// A path (dot-separated key sequence, array indices as numeric segments)
/// is reported as different when the corresponding sub-values are deeply
/// unequal or one side is missing. The root path "" is different whenever
/// any descendant is, which is what drives the collapsed-node
/// highlighting of the comparison view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffReport {
    differing: BTreeSet<String>,
}

impl DiffReport {
    /// Whether the values at `path` differ
    pub fn is_different(&self, path: &str) -> bool {
        self.differing.contains(path)
    }

    /// All differing paths
    pub fn paths(&self) -> &BTreeSet<String> {
        &self.differing
    }

    /// True when the two payloads are deeply equal
    pub fn is_empty(&self) -> bool {
        self.differing.is_empty()
    }
}

/// Compares two JSON-compatible values rooted at path ""
pub fn diff_paths(left: &Value, right: &Value) -> DiffReport {
    let mut differing = BTreeSet::new();
    walk(Some(left), Some(right), "", &mut differing);
    DiffReport { differing }
}

fn walk(left: Option<&Value>, right: Option<&Value>, path: &str, out: &mut BTreeSet<String>) {
    // serde_json equality is structural: order-independent for objects,
    // element-wise with matching length for arrays
    if let (Some(l), Some(r)) = (left, right) {
        if l == r {
            return;
        }
    }

    out.insert(path.to_string());

    let mut segments: BTreeSet<String> = BTreeSet::new();
    for side in [left, right] {
        match side {
            Some(Value::Object(map)) => segments.extend(map.keys().cloned()),
            Some(Value::Array(items)) => segments.extend((0..items.len()).map(|i| i.to_string())),
            _ => {}
        }
    }

    for segment in segments {
        walk(
            child_of(left, &segment),
            child_of(right, &segment),
            &join_path(path, &segment),
            out,
        );
    }
}

fn child_of<'a>(value: Option<&'a Value>, segment: &str) -> Option<&'a Value> {
    match value? {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Paths of every container node in a payload, used to expand the whole
/// comparison tree at once
pub fn collect_json_paths(value: &Value) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect(value, "", &mut paths);
    paths
}

fn collect(value: &Value, path: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            out.insert(path.to_string());
            for (key, child) in map {
                collect(child, &join_path(path, key), out);
            }
        }
        Value::Array(items) => {
            out.insert(path.to_string());
            for (index, child) in items.iter().enumerate() {
                collect(child, &join_path(path, &index.to_string()), out);
            }
        }
        _ => {}
    }
}

fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", parent, segment)
    }
}
