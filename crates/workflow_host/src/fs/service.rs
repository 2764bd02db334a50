//! Directory backend service contract.

use std::{future::Future, pin::Pin};

use serde_json::Value;

use super::types::{BrowseResult, PreviewImage, PreviewUpload, UploadFile, ViewMode};

/// Object-safe boxed future used by [`DirectoryClient`] async methods.
pub type DirectoryFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend service for browsing and mutating the workflow directory tree.
///
/// Every method reports failure as the server's (or transport's) message. A `{success: false}`
/// response from the backend is an `Err`, never an `Ok` payload.
pub trait DirectoryClient {
    /// Lists the direct children of `path` (`""` = root).
    fn browse<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>>;

    /// Creates the folder `name` inside `parent_path`.
    fn create_folder<'a>(
        &'a self,
        name: &'a str,
        parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>>;

    /// Renames the entry at `old_path` to `new_name` within the same directory.
    ///
    /// Not idempotent: repeating the call after success fails because `old_path` is gone.
    fn rename<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>>;

    /// Deletes a document or a folder with its contents.
    fn delete<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>>;

    /// Moves `source_path` into the directory `target_dir`.
    fn move_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>>;

    /// Copies `source_path` into the directory `target_dir`.
    fn copy_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>>;

    /// Reads and parses a document.
    fn read_document<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<Value, String>>;

    /// Uploads documents into `target_dir`, creating missing folders when `create_dirs` is set.
    ///
    /// Returns the number of documents the backend stored.
    fn upload_documents<'a>(
        &'a self,
        target_dir: &'a str,
        files: &'a [UploadFile],
        create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>>;

    /// Fetches the preview image of a document; `Ok(None)` when it has none.
    fn fetch_preview<'a>(
        &'a self,
        path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>>;

    /// Replaces the preview image of a document.
    fn upload_preview<'a>(
        &'a self,
        path: &'a str,
        image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>>;

    /// Mirrors the view mode to server config.
    fn save_view_mode<'a>(&'a self, mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>>;

    /// Mirrors the last browsed directory to server config.
    fn save_last_path<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Directory client for contexts without a backend; every request fails.
pub struct NoopDirectoryClient;

impl NoopDirectoryClient {
    fn unsupported_error(op: &str) -> String {
        format!("workflow directory backend unavailable: {op}")
    }
}

impl DirectoryClient for NoopDirectoryClient {
    fn browse<'a>(&'a self, _path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>> {
        Box::pin(async { Err(Self::unsupported_error("browse")) })
    }

    fn create_folder<'a>(
        &'a self,
        _name: &'a str,
        _parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("create_folder")) })
    }

    fn rename<'a>(
        &'a self,
        _old_path: &'a str,
        _new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("rename")) })
    }

    fn delete<'a>(&'a self, _path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("delete")) })
    }

    fn move_entry<'a>(
        &'a self,
        _source_path: &'a str,
        _target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("move")) })
    }

    fn copy_entry<'a>(
        &'a self,
        _source_path: &'a str,
        _target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("copy")) })
    }

    fn read_document<'a>(&'a self, _path: &'a str) -> DirectoryFuture<'a, Result<Value, String>> {
        Box::pin(async { Err(Self::unsupported_error("read_document")) })
    }

    fn upload_documents<'a>(
        &'a self,
        _target_dir: &'a str,
        _files: &'a [UploadFile],
        _create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>> {
        Box::pin(async { Err(Self::unsupported_error("upload_documents")) })
    }

    fn fetch_preview<'a>(
        &'a self,
        _path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn upload_preview<'a>(
        &'a self,
        _path: &'a str,
        _image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Err(Self::unsupported_error("upload_preview")) })
    }

    fn save_view_mode<'a>(&'a self, _mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn save_last_path<'a>(&'a self, _path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn noop_directory_client_rejects_requests_but_accepts_config_writes() {
        let client = NoopDirectoryClient;
        let client_obj: &dyn DirectoryClient = &client;

        let err = block_on(client_obj.browse("")).expect_err("browse should fail");
        assert!(err.contains("browse"));
        let err = block_on(client_obj.move_entry("a", "b")).expect_err("move should fail");
        assert!(err.contains("move"));

        assert_eq!(block_on(client_obj.fetch_preview("a.json")).expect("preview"), None);
        block_on(client_obj.save_view_mode(ViewMode::Grid)).expect("save view mode");
        block_on(client_obj.save_last_path("a")).expect("save last path");
    }
}
