use serde_json::Value;

use super::TagId;

/// A user-defined label attachable to time entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub label: String,
    pub color: Option<String>,
}

impl Tag {
    pub fn new(id: impl Into<TagId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Convert one backend item into a tag.
    ///
    /// Plain strings are used as both id and label. Objects take their label
    /// from `label`, falling back to `name`, and their id from `id`, falling
    /// back to the label. Anything without a label or id is `None`.
    pub fn from_json(item: &Value) -> Option<Self> {
        match item {
            Value::String(s) if !s.is_empty() => Some(Self::new(s.as_str(), s.as_str())),
            Value::Object(map) => {
                let label = map
                    .get("label")
                    .and_then(Value::as_str)
                    .or_else(|| map.get("name").and_then(Value::as_str))
                    .filter(|label| !label.is_empty())?;
                let id = map
                    .get("id")
                    .and_then(TagId::from_json)
                    .unwrap_or_else(|| TagId::from(label));
                let color = map.get("color").and_then(Value::as_str).map(str::to_string);

                Some(Self {
                    id,
                    label: label.to_string(),
                    color,
                })
            }
            _ => None,
        }
    }
}

/// Normalize a tag list payload. Non-arrays are treated as empty and
/// unusable items are skipped.
pub fn normalize_tags(payload: &Value) -> Vec<Tag> {
    payload
        .as_array()
        .map(|items| items.iter().filter_map(Tag::from_json).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_strings_and_objects() {
        let tags = normalize_tags(&json!([
            "focus",
            {"id": 7, "name": "Design", "color": "#2563eb"},
            {"id": "x", "label": "Review", "name": "ignored"},
        ]));

        assert_eq!(
            tags,
            vec![
                Tag::new("focus", "focus"),
                Tag::new("7", "Design").with_color("#2563eb"),
                Tag::new("x", "Review"),
            ]
        );
    }

    #[test]
    fn falls_back_to_label_for_missing_id() {
        let tags = normalize_tags(&json!([{ "name": "Planning" }]));
        assert_eq!(tags, vec![Tag::new("Planning", "Planning")]);
    }

    #[test]
    fn drops_items_without_label() {
        let tags = normalize_tags(&json!([{ "id": 1 }, null, 3, { "id": 2, "name": "" }]));
        assert!(tags.is_empty());
    }

    #[test]
    fn non_array_payload_is_empty() {
        assert!(normalize_tags(&json!({ "tags": [] })).is_empty());
    }
}
