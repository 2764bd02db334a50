//! In-memory directory backend used by tests and offline previews of the panel.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde_json::Value;

use super::path::{file_name, has_extension, is_same_or_descendant, join_path, parent_path};
use super::service::{DirectoryClient, DirectoryFuture};
use super::types::{
    BrowseResult, DirectoryEntry, EntryKind, PanelConfig, PreviewImage, PreviewUpload, UploadFile,
    ViewMode, DOCUMENT_EXTENSION,
};
use crate::time::unix_time_ms_now;

#[derive(Debug, Clone, PartialEq)]
/// One request observed by [`MemoryDirectoryClient`], in call order.
pub enum DirectoryCall {
    /// `browse(path)`.
    Browse(String),
    /// `create_folder(name, parent_path)`.
    CreateFolder {
        /// Folder name.
        name: String,
        /// Parent directory.
        parent_path: String,
    },
    /// `rename(old_path, new_name)`.
    Rename {
        /// Original path.
        old_path: String,
        /// Requested name.
        new_name: String,
    },
    /// `delete(path)`.
    Delete(String),
    /// `move_entry(source, target_dir)`.
    Move {
        /// Moved path.
        source: String,
        /// Destination directory.
        target_dir: String,
    },
    /// `copy_entry(source, target_dir)`.
    Copy {
        /// Copied path.
        source: String,
        /// Destination directory.
        target_dir: String,
    },
    /// `read_document(path)`.
    ReadDocument(String),
    /// `upload_documents(target_dir, files, create_dirs)`.
    Upload {
        /// Destination directory.
        target_dir: String,
        /// Uploaded file names.
        names: Vec<String>,
        /// Whether missing folders were requested to be created.
        create_dirs: bool,
    },
    /// `fetch_preview(path)`.
    FetchPreview(String),
    /// `upload_preview(path, image)`.
    UploadPreview(String),
    /// `save_view_mode(mode)`.
    SaveViewMode(ViewMode),
    /// `save_last_path(path)`.
    SaveLastPath(String),
}

impl DirectoryCall {
    /// Returns `true` for calls that change the tree or its previews.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateFolder { .. }
                | Self::Rename { .. }
                | Self::Delete(_)
                | Self::Move { .. }
                | Self::Copy { .. }
                | Self::Upload { .. }
                | Self::UploadPreview(_)
        )
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: EntryKind,
    modified: f64,
    text: String,
    preview: Option<PreviewImage>,
}

#[derive(Debug, Default)]
struct MemoryTree {
    nodes: BTreeMap<String, MemoryNode>,
    calls: Vec<DirectoryCall>,
    config: PanelConfig,
    failing: Vec<String>,
}

impl MemoryTree {
    fn is_dir(&self, path: &str) -> bool {
        path.is_empty()
            || self
                .nodes
                .get(path)
                .is_some_and(|node| node.kind.is_directory())
    }

    fn check_failure(&self, path: &str) -> Result<(), String> {
        if self.failing.iter().any(|p| p == path) {
            Err(format!("simulated failure for {path}"))
        } else {
            Ok(())
        }
    }

    fn subtree_keys(&self, root: &str) -> Vec<String> {
        self.nodes
            .keys()
            .filter(|key| is_same_or_descendant(key, root))
            .cloned()
            .collect()
    }

    fn relocate(&mut self, source: &str, dest: &str, keep_source: bool) {
        for key in self.subtree_keys(source) {
            let node = if keep_source {
                self.nodes.get(&key).cloned()
            } else {
                self.nodes.remove(&key)
            };
            if let Some(mut node) = node {
                node.modified = now_seconds();
                let new_key = format!("{dest}{}", &key[source.len()..]);
                self.nodes.insert(new_key, node);
            }
        }
    }

    fn ensure_dirs(&mut self, path: &str) {
        let mut current = String::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = join_path(&current, segment);
            self.nodes
                .entry(current.clone())
                .or_insert_with(|| MemoryNode {
                    kind: EntryKind::Directory,
                    modified: now_seconds(),
                    text: String::new(),
                    preview: None,
                });
        }
    }

    fn listing(&self, dir: &str) -> Vec<DirectoryEntry> {
        self.nodes
            .iter()
            .filter(|(key, _)| parent_path(key) == dir && !key.is_empty())
            .map(|(key, node)| match node.kind {
                EntryKind::Directory => {
                    let count = self
                        .nodes
                        .iter()
                        .filter(|(child, child_node)| {
                            parent_path(child) == *key && !child_node.kind.is_directory()
                        })
                        .count();
                    let mut entry = DirectoryEntry::directory(key, count as u32);
                    entry.modified = node.modified;
                    entry
                }
                EntryKind::Document => {
                    DirectoryEntry::document(key, node.text.len() as u64, node.modified)
                }
            })
            .collect()
    }
}

fn now_seconds() -> f64 {
    unix_time_ms_now() as f64 / 1000.0
}

#[derive(Debug, Clone, Default)]
/// In-memory [`DirectoryClient`] with a shared tree, call log, and failure injection.
///
/// Clones share state, so a test can keep one handle while the panel owns another.
pub struct MemoryDirectoryClient {
    inner: Rc<RefCell<MemoryTree>>,
}

impl MemoryDirectoryClient {
    /// Adds a folder (and any missing ancestors).
    pub fn with_directory(self, path: &str) -> Self {
        self.inner.borrow_mut().ensure_dirs(path);
        self
    }

    /// Adds a document with the given body and modification time (ancestors are created).
    pub fn with_document(self, path: &str, text: &str, modified: f64) -> Self {
        {
            let mut tree = self.inner.borrow_mut();
            tree.ensure_dirs(&parent_path(path));
            tree.nodes.insert(
                path.to_string(),
                MemoryNode {
                    kind: EntryKind::Document,
                    modified,
                    text: text.to_string(),
                    preview: None,
                },
            );
        }
        self
    }

    /// Attaches a preview image to an existing document.
    pub fn with_preview(self, path: &str, image: PreviewImage) -> Self {
        if let Some(node) = self.inner.borrow_mut().nodes.get_mut(path) {
            node.preview = Some(image);
        }
        self
    }

    /// Sets the config returned with every browse result.
    pub fn with_config(self, config: PanelConfig) -> Self {
        self.inner.borrow_mut().config = config;
        self
    }

    /// Makes every mutation or read that targets `path` fail.
    pub fn fail_on(&self, path: &str) {
        self.inner.borrow_mut().failing.push(path.to_string());
    }

    /// Returns the observed calls in order.
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.inner.borrow().calls.clone()
    }

    /// Returns only the tree-changing calls in order.
    pub fn mutations(&self) -> Vec<DirectoryCall> {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Clears the call log.
    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Returns `true` when a node exists at `path`.
    pub fn exists(&self, path: &str) -> bool {
        self.inner.borrow().nodes.contains_key(path)
    }

    /// Returns the config as last written through the save calls.
    pub fn config(&self) -> PanelConfig {
        self.inner.borrow().config.clone()
    }

    fn record(&self, call: DirectoryCall) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn browse_now(&self, path: &str) -> Result<BrowseResult, String> {
        self.record(DirectoryCall::Browse(path.to_string()));
        let tree = self.inner.borrow();
        tree.check_failure(path)?;
        if !tree.is_dir(path) {
            return Err(format!("directory not found: {path}"));
        }
        Ok(BrowseResult {
            items: tree.listing(path),
            config: Some(tree.config.clone()),
        })
    }

    fn create_folder_now(&self, name: &str, parent: &str) -> Result<(), String> {
        self.record(DirectoryCall::CreateFolder {
            name: name.to_string(),
            parent_path: parent.to_string(),
        });
        let mut tree = self.inner.borrow_mut();
        let name = name.trim();
        if name.is_empty() || name.contains('/') {
            return Err(format!("invalid folder name: {name:?}"));
        }
        if !tree.is_dir(parent) {
            return Err(format!("parent directory not found: {parent}"));
        }
        let path = join_path(parent, name);
        tree.check_failure(&path)?;
        if tree.nodes.contains_key(&path) {
            return Err(format!("already exists: {path}"));
        }
        tree.ensure_dirs(&path);
        Ok(())
    }

    fn rename_now(&self, old_path: &str, new_name: &str) -> Result<(), String> {
        self.record(DirectoryCall::Rename {
            old_path: old_path.to_string(),
            new_name: new_name.to_string(),
        });
        let mut tree = self.inner.borrow_mut();
        tree.check_failure(old_path)?;
        let Some(node) = tree.nodes.get(old_path) else {
            return Err(format!("not found: {old_path}"));
        };
        let mut name = new_name.trim().to_string();
        if name.is_empty() || name.contains('/') {
            return Err(format!("invalid name: {new_name:?}"));
        }
        if !node.kind.is_directory() && !has_extension(&name, DOCUMENT_EXTENSION) {
            name = format!("{name}.{DOCUMENT_EXTENSION}");
        }
        let new_path = join_path(&parent_path(old_path), &name);
        if tree.nodes.contains_key(&new_path) {
            return Err(format!("already exists: {new_path}"));
        }
        tree.relocate(old_path, &new_path, false);
        Ok(())
    }

    fn delete_now(&self, path: &str) -> Result<(), String> {
        self.record(DirectoryCall::Delete(path.to_string()));
        let mut tree = self.inner.borrow_mut();
        tree.check_failure(path)?;
        if path.is_empty() || !tree.nodes.contains_key(path) {
            return Err(format!("not found: {path}"));
        }
        for key in tree.subtree_keys(path) {
            tree.nodes.remove(&key);
        }
        Ok(())
    }

    fn transfer_now(
        &self,
        source: &str,
        target_dir: &str,
        keep_source: bool,
    ) -> Result<(), String> {
        self.record(if keep_source {
            DirectoryCall::Copy {
                source: source.to_string(),
                target_dir: target_dir.to_string(),
            }
        } else {
            DirectoryCall::Move {
                source: source.to_string(),
                target_dir: target_dir.to_string(),
            }
        });
        let mut tree = self.inner.borrow_mut();
        tree.check_failure(source)?;
        if !tree.nodes.contains_key(source) {
            return Err(format!("not found: {source}"));
        }
        if !tree.is_dir(target_dir) {
            return Err(format!("target directory not found: {target_dir}"));
        }
        if is_same_or_descendant(target_dir, source) {
            return Err(format!("cannot place {source} inside itself"));
        }
        let dest = join_path(target_dir, file_name(source));
        if tree.nodes.contains_key(&dest) {
            return Err(format!("already exists: {dest}"));
        }
        tree.relocate(source, &dest, keep_source);
        Ok(())
    }

    fn read_document_now(&self, path: &str) -> Result<Value, String> {
        self.record(DirectoryCall::ReadDocument(path.to_string()));
        let tree = self.inner.borrow();
        tree.check_failure(path)?;
        match tree.nodes.get(path) {
            Some(node) if !node.kind.is_directory() => {
                serde_json::from_str(&node.text).map_err(|e| e.to_string())
            }
            _ => Err(format!("document not found: {path}")),
        }
    }

    fn upload_now(
        &self,
        target_dir: &str,
        files: &[UploadFile],
        create_dirs: bool,
    ) -> Result<usize, String> {
        self.record(DirectoryCall::Upload {
            target_dir: target_dir.to_string(),
            names: files.iter().map(|f| f.name.clone()).collect(),
            create_dirs,
        });
        let mut tree = self.inner.borrow_mut();
        tree.check_failure(target_dir)?;
        if !tree.is_dir(target_dir) {
            if !create_dirs {
                return Err(format!("target directory not found: {target_dir}"));
            }
            tree.ensure_dirs(target_dir);
        }
        for file in files {
            tree.nodes.insert(
                join_path(target_dir, &file.name),
                MemoryNode {
                    kind: EntryKind::Document,
                    modified: now_seconds(),
                    text: file.text.clone(),
                    preview: None,
                },
            );
        }
        Ok(files.len())
    }

    fn fetch_preview_now(&self, path: &str) -> Result<Option<PreviewImage>, String> {
        self.record(DirectoryCall::FetchPreview(path.to_string()));
        let tree = self.inner.borrow();
        tree.check_failure(path)?;
        Ok(tree.nodes.get(path).and_then(|node| node.preview.clone()))
    }

    fn upload_preview_now(&self, path: &str, image: &PreviewUpload) -> Result<(), String> {
        self.record(DirectoryCall::UploadPreview(path.to_string()));
        let mut tree = self.inner.borrow_mut();
        tree.check_failure(path)?;
        match tree.nodes.get_mut(path) {
            Some(node) if !node.kind.is_directory() => {
                node.preview = Some(PreviewImage {
                    content_type: image.content_type.clone(),
                    bytes: image.bytes.clone(),
                });
                Ok(())
            }
            _ => Err(format!("document not found: {path}")),
        }
    }
}

impl DirectoryClient for MemoryDirectoryClient {
    fn browse<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>> {
        Box::pin(async move { self.browse_now(path) })
    }

    fn create_folder<'a>(
        &'a self,
        name: &'a str,
        parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.create_folder_now(name, parent_path) })
    }

    fn rename<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.rename_now(old_path, new_name) })
    }

    fn delete<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.delete_now(path) })
    }

    fn move_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.transfer_now(source_path, target_dir, false) })
    }

    fn copy_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.transfer_now(source_path, target_dir, true) })
    }

    fn read_document<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<Value, String>> {
        Box::pin(async move { self.read_document_now(path) })
    }

    fn upload_documents<'a>(
        &'a self,
        target_dir: &'a str,
        files: &'a [UploadFile],
        create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>> {
        Box::pin(async move { self.upload_now(target_dir, files, create_dirs) })
    }

    fn fetch_preview<'a>(
        &'a self,
        path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async move { self.fetch_preview_now(path) })
    }

    fn upload_preview<'a>(
        &'a self,
        path: &'a str,
        image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move { self.upload_preview_now(path, image) })
    }

    fn save_view_mode<'a>(&'a self, mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.record(DirectoryCall::SaveViewMode(mode));
            self.inner.borrow_mut().config.view_mode = Some(mode);
            Ok(())
        })
    }

    fn save_last_path<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.record(DirectoryCall::SaveLastPath(path.to_string()));
            self.inner.borrow_mut().config.last_path = Some(path.to_string());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    fn sample() -> MemoryDirectoryClient {
        MemoryDirectoryClient::default()
            .with_directory("a/sub")
            .with_document("a/one.json", "{}", 10.0)
            .with_document("b.json", "{\"nodes\":[]}", 20.0)
    }

    #[test]
    fn browse_lists_direct_children_with_counts() {
        let client = sample();
        let result = block_on(client.browse("")).expect("browse root");
        let names: Vec<_> = result.items.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(names, vec!["a", "b.json"]);
        assert_eq!(result.items[0].child_document_count, Some(1));
        assert_eq!(result.items[1].size, Some(12));

        let err = block_on(client.browse("missing")).expect_err("missing dir");
        assert!(err.contains("missing"));
    }

    #[test]
    fn rename_appends_document_extension_and_is_not_idempotent() {
        let client = sample();
        block_on(client.rename("b.json", "c")).expect("rename");
        assert!(client.exists("c.json"));
        assert!(!client.exists("b.json"));
        assert!(block_on(client.rename("b.json", "c")).is_err());
    }

    #[test]
    fn move_relocates_subtree_and_rejects_self_nesting() {
        let client = sample().with_directory("dest");
        block_on(client.move_entry("a", "dest")).expect("move");
        assert!(client.exists("dest/a/sub"));
        assert!(client.exists("dest/a/one.json"));
        assert!(!client.exists("a"));

        let err = block_on(client.move_entry("dest", "dest/a")).expect_err("self nesting");
        assert!(err.contains("inside itself"));
    }

    #[test]
    fn copy_keeps_source_and_upload_creates_directories() {
        let client = sample();
        block_on(client.copy_entry("b.json", "a")).expect("copy");
        assert!(client.exists("b.json"));
        assert!(client.exists("a/b.json"));

        let files = vec![UploadFile {
            name: "x.json".to_string(),
            text: "{}".to_string(),
        }];
        assert!(block_on(client.upload_documents("new/deep", &files, false)).is_err());
        assert_eq!(
            block_on(client.upload_documents("new/deep", &files, true)).expect("upload"),
            1
        );
        assert!(client.exists("new/deep/x.json"));
    }

    #[test]
    fn failure_injection_and_call_log() {
        let client = sample();
        client.fail_on("b.json");
        assert!(block_on(client.delete("b.json")).is_err());
        block_on(client.delete("a")).expect("delete dir");
        assert!(!client.exists("a/one.json"));
        assert_eq!(
            client.mutations(),
            vec![
                DirectoryCall::Delete("b.json".to_string()),
                DirectoryCall::Delete("a".to_string())
            ]
        );
    }
}
