//! Planning uploads for files and folders dropped from outside the application.

use std::collections::BTreeMap;

use workflow_host::{has_extension, join_path, DroppedItem, UploadFile, DOCUMENT_EXTENSION};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Uploads grouped by destination directory.
pub struct UploadPlan {
    /// Files to upload keyed by absolute target directory (auto-created on upload).
    pub groups: BTreeMap<String, Vec<UploadFile>>,
    /// Files without the document extension; ignored without being counted as failures.
    pub ignored: usize,
    /// Document files whose contents are not valid JSON.
    pub rejected: usize,
}

impl UploadPlan {
    /// Number of files that will be uploaded.
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Returns `true` when nothing would be uploaded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Walks dropped items recursively and groups valid documents by their relative folder under
/// `target_dir`.
pub fn plan_external_drop(target_dir: &str, items: &[DroppedItem]) -> UploadPlan {
    let mut plan = UploadPlan::default();
    walk(&mut plan, target_dir, items);
    plan
}

fn walk(plan: &mut UploadPlan, dir: &str, items: &[DroppedItem]) {
    for item in items {
        match item {
            DroppedItem::File { name, text } => {
                if !has_extension(name, DOCUMENT_EXTENSION) {
                    plan.ignored += 1;
                    continue;
                }
                if serde_json::from_str::<serde_json::Value>(text).is_err() {
                    plan.rejected += 1;
                    continue;
                }
                plan.groups
                    .entry(dir.to_string())
                    .or_default()
                    .push(UploadFile {
                        name: name.clone(),
                        text: text.clone(),
                    });
            }
            DroppedItem::Directory { name, children } => {
                walk(plan, &join_path(dir, name), children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn file(name: &str, text: &str) -> DroppedItem {
        DroppedItem::File {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn nested_folders_map_to_target_subdirectories() {
        let items = vec![
            file("top.json", "{}"),
            DroppedItem::Directory {
                name: "pack".to_string(),
                children: vec![
                    file("one.json", "{\"nodes\":[]}"),
                    file("readme.md", "# hi"),
                    DroppedItem::Directory {
                        name: "inner".to_string(),
                        children: vec![file("two.JSON", "[]"), file("bad.json", "{oops")],
                    },
                ],
            },
        ];

        let plan = plan_external_drop("team", &items);
        let dirs: Vec<_> = plan.groups.keys().map(String::as_str).collect();
        assert_eq!(dirs, vec!["team", "team/pack", "team/pack/inner"]);
        assert_eq!(plan.groups["team/pack/inner"][0].name, "two.JSON");
        assert_eq!(plan.file_count(), 3);
        assert_eq!(plan.ignored, 1);
        assert_eq!(plan.rejected, 1);
    }

    #[test]
    fn drop_into_root_uses_relative_paths() {
        let items = vec![DroppedItem::Directory {
            name: "pack".to_string(),
            children: vec![file("a.json", "{}")],
        }];
        let plan = plan_external_drop("", &items);
        assert_eq!(plan.groups.keys().collect::<Vec<_>>(), vec!["pack"]);
        assert!(plan_external_drop("", &[file("x.txt", "")]).is_empty());
    }
}
