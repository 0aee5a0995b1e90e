use crate::js::marshal::{InvalidArgument, ScriptValue};

/// A named group of file-extension patterns restricting selectable files.
///
/// Extensions are carried verbatim and order-preserving; the native layer
/// owns matching semantics, so nothing here deduplicates or case-folds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeFilter {
    pub description: String,
    pub extensions: Vec<String>,
}

/// The native filter representation consumed by the selection dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilterSet {
    pub groups: Vec<FileTypeFilter>,
    /// Always on: the dialog offers an "all files" option.
    pub include_all_files: bool,
    /// Always on: the dialog can navigate drive/volume roots.
    pub support_drive: bool,
}

impl FileFilterSet {
    /// An empty-but-present filter set means something different to the
    /// native dialog than "no restriction", so callers pass `None` downstream
    /// when no groups were supplied.
    pub fn into_active(self) -> Option<FileFilterSet> {
        if self.groups.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

pub fn build_filter_set(filters: &[FileTypeFilter]) -> FileFilterSet {
    FileFilterSet {
        groups: filters.to_vec(),
        include_all_files: true,
        support_drive: true,
    }
}

/// Marshal the script-side `fileTypes` array into typed filters.
///
/// `position` is the top-level argument position of the array, reported on
/// any malformed entry so the caller sees which argument was at fault.
pub fn filters_from_entries(
    entries: &[ScriptValue],
    position: usize,
) -> Result<Vec<FileTypeFilter>, InvalidArgument> {
    let malformed =
        || InvalidArgument::new(position, "an array of {description, extensions} objects");

    let mut filters = Vec::with_capacity(entries.len());
    for entry in entries {
        let ScriptValue::Object(fields) = entry else {
            return Err(malformed());
        };
        let Some(ScriptValue::Text(description)) = fields.get("description") else {
            return Err(malformed());
        };
        let Some(ScriptValue::Array(raw_extensions)) = fields.get("extensions") else {
            return Err(malformed());
        };

        let mut extensions = Vec::with_capacity(raw_extensions.len());
        for extension in raw_extensions {
            let ScriptValue::Text(extension) = extension else {
                return Err(malformed());
            };
            extensions.push(extension.clone());
        }

        filters.push(FileTypeFilter {
            description: description.clone(),
            extensions,
        });
    }
    Ok(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(description: &str, extensions: &[&str]) -> ScriptValue {
        let mut fields = HashMap::new();
        fields.insert(
            "description".to_string(),
            ScriptValue::Text(description.to_string()),
        );
        fields.insert(
            "extensions".to_string(),
            ScriptValue::Array(
                extensions
                    .iter()
                    .map(|e| ScriptValue::Text(e.to_string()))
                    .collect(),
            ),
        );
        ScriptValue::Object(fields)
    }

    #[test]
    fn empty_input_builds_inactive_set() {
        let set = build_filter_set(&[]);
        assert!(set.include_all_files);
        assert!(set.support_drive);
        assert!(set.into_active().is_none());
    }

    #[test]
    fn extensions_are_copied_verbatim_in_order() {
        let filters = filters_from_entries(
            &[entry("Images", &["png", "JPG", "png", "gif"])],
            4,
        )
        .unwrap();
        assert_eq!(filters[0].extensions, vec!["png", "JPG", "png", "gif"]);

        let set = build_filter_set(&filters).into_active().unwrap();
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.groups[0].description, "Images");
    }

    #[test]
    fn group_order_is_preserved() {
        let filters = filters_from_entries(
            &[entry("Docs", &["txt"]), entry("Images", &["png"])],
            4,
        )
        .unwrap();
        assert_eq!(filters[0].description, "Docs");
        assert_eq!(filters[1].description, "Images");
    }

    #[test]
    fn malformed_entry_reports_array_position() {
        let err = filters_from_entries(&[ScriptValue::Number(1.0)], 4).unwrap_err();
        assert_eq!(err.position, 4);

        let mut fields = HashMap::new();
        fields.insert("description".to_string(), ScriptValue::Text("x".into()));
        // missing extensions
        let err = filters_from_entries(&[ScriptValue::Object(fields)], 4).unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn non_text_extension_is_rejected() {
        let mut fields = HashMap::new();
        fields.insert("description".to_string(), ScriptValue::Text("x".into()));
        fields.insert(
            "extensions".to_string(),
            ScriptValue::Array(vec![ScriptValue::Number(3.0)]),
        );
        assert!(filters_from_entries(&[ScriptValue::Object(fields)], 4).is_err());
    }
}
