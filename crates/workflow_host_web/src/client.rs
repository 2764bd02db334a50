//! HTTP directory client backed by the browser `fetch` bridge.

use serde::Serialize;
use serde_json::{Map, Value};
use workflow_host::{
    BrowseResult, DirectoryClient, DirectoryFuture, PreviewImage, PreviewUpload, UploadFile,
    ViewMode, LAST_PATH_CONFIG_KEY, VIEW_MODE_CONFIG_KEY,
};

use crate::{bridge, ApiRoutes};

#[derive(Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
    parent_path: &'a str,
}

#[derive(Serialize)]
struct RenameBody<'a> {
    old_path: &'a str,
    new_name: &'a str,
}

#[derive(Serialize)]
struct PathBody<'a> {
    path: &'a str,
}

#[derive(Serialize)]
struct TransferBody<'a> {
    source_path: &'a str,
    target_dir: &'a str,
}

fn to_body<T: Serialize>(body: &T) -> Result<Value, String> {
    serde_json::to_value(body).map_err(|e| e.to_string())
}

fn config_body(key: &str, value: &str) -> Value {
    let mut body = Map::new();
    body.insert(key.to_string(), Value::String(value.to_string()));
    Value::Object(body)
}

/// Turns a `{success: false, error}` envelope into `Err(error)`.
///
/// Responses without a `success` flag are accepted as-is.
pub(crate) fn check_success(response: Value) -> Result<Value, String> {
    match response.get("success").and_then(Value::as_bool) {
        Some(false) => Err(response
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string()),
        _ => Ok(response),
    }
}

pub(crate) fn parse_browse(response: Value) -> Result<BrowseResult, String> {
    let response = check_success(response)?;
    serde_json::from_value(response).map_err(|e| format!("malformed listing: {e}"))
}

pub(crate) fn parse_document(response: Value) -> Result<Value, String> {
    let mut response = check_success(response)?;
    match response.get_mut("workflow").map(Value::take) {
        Some(Value::Null) | None => Err("response carried no document".to_string()),
        Some(document) => Ok(document),
    }
}

/// Reads the stored-document count, falling back to the number sent when the backend omits it.
pub(crate) fn parse_upload_count(response: Value, sent: usize) -> Result<usize, String> {
    let response = check_success(response)?;
    let uploaded = match response.get("uploaded") {
        Some(Value::Number(count)) => count.as_u64().map(|count| count as usize),
        Some(Value::Array(names)) => Some(names.len()),
        _ => None,
    };
    Ok(uploaded.filter(|count| *count > 0).unwrap_or(sent))
}

#[derive(Debug, Clone, Default)]
/// [`DirectoryClient`] speaking the workflow backend's JSON/multipart HTTP API.
pub struct HttpDirectoryClient {
    routes: ApiRoutes,
}

impl HttpDirectoryClient {
    /// Creates a client over `routes`.
    pub fn new(routes: ApiRoutes) -> Self {
        Self { routes }
    }

    /// Returns the endpoint layout in use.
    pub fn routes(&self) -> &ApiRoutes {
        &self.routes
    }

    async fn post(&self, route: &str, body: Value) -> Result<Value, String> {
        let url = self.routes.url(route);
        let response = bridge::json_request("POST", &url, None, Some(&body)).await?;
        check_success(response)
    }

    async fn get_with_path(&self, route: &str, path: &str) -> Result<Value, String> {
        let url = self.routes.url(route);
        bridge::json_request("GET", &url, Some(path), None).await
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn browse<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<BrowseResult, String>> {
        Box::pin(async move { parse_browse(self.get_with_path(&self.routes.browse, path).await?) })
    }

    fn create_folder<'a>(
        &'a self,
        name: &'a str,
        parent_path: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = to_body(&CreateFolderBody { name, parent_path })?;
            self.post(&self.routes.create_folder, body).await.map(|_| ())
        })
    }

    fn rename<'a>(
        &'a self,
        old_path: &'a str,
        new_name: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = to_body(&RenameBody { old_path, new_name })?;
            self.post(&self.routes.rename, body).await.map(|_| ())
        })
    }

    fn delete<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = to_body(&PathBody { path })?;
            self.post(&self.routes.delete, body).await.map(|_| ())
        })
    }

    fn move_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = to_body(&TransferBody {
                source_path,
                target_dir,
            })?;
            self.post(&self.routes.move_entry, body).await.map(|_| ())
        })
    }

    fn copy_entry<'a>(
        &'a self,
        source_path: &'a str,
        target_dir: &'a str,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = to_body(&TransferBody {
                source_path,
                target_dir,
            })?;
            self.post(&self.routes.copy_entry, body).await.map(|_| ())
        })
    }

    fn read_document<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<Value, String>> {
        Box::pin(async move {
            parse_document(self.get_with_path(&self.routes.read_document, path).await?)
        })
    }

    fn upload_documents<'a>(
        &'a self,
        target_dir: &'a str,
        files: &'a [UploadFile],
        create_dirs: bool,
    ) -> DirectoryFuture<'a, Result<usize, String>> {
        Box::pin(async move {
            let url = self.routes.url(&self.routes.upload_documents);
            let response = bridge::upload_documents(&url, target_dir, files, create_dirs).await?;
            parse_upload_count(response, files.len())
        })
    }

    fn fetch_preview<'a>(
        &'a self,
        path: &'a str,
    ) -> DirectoryFuture<'a, Result<Option<PreviewImage>, String>> {
        Box::pin(async move {
            let url = self.routes.url(&self.routes.preview);
            bridge::fetch_preview(&url, path).await
        })
    }

    fn upload_preview<'a>(
        &'a self,
        path: &'a str,
        image: &'a PreviewUpload,
    ) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let url = self.routes.url(&self.routes.upload_preview);
            check_success(bridge::upload_preview(&url, path, image).await?).map(|_| ())
        })
    }

    fn save_view_mode<'a>(&'a self, mode: ViewMode) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = config_body(VIEW_MODE_CONFIG_KEY, mode.as_str());
            self.post(&self.routes.save_config, body).await.map(|_| ())
        })
    }

    fn save_last_path<'a>(&'a self, path: &'a str) -> DirectoryFuture<'a, Result<(), String>> {
        Box::pin(async move {
            let body = config_body(LAST_PATH_CONFIG_KEY, path);
            self.post(&self.routes.save_config, body).await.map(|_| ())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;
    use workflow_host::{DirectoryEntry, EntryKind};

    use super::*;

    #[test]
    fn failure_envelope_becomes_error_message() {
        let err = check_success(json!({"success": false, "error": "target exists"}))
            .expect_err("should fail");
        assert_eq!(err, "target exists");
        let err = check_success(json!({"success": false})).expect_err("should fail");
        assert_eq!(err, "request failed");
        assert!(check_success(json!({"items": []})).is_ok());
    }

    #[test]
    fn browse_response_parses_items_and_config() {
        let listing = parse_browse(json!({
            "success": true,
            "items": [
                {"name": "a", "path": "a", "type": "directory", "modified": 0, "workflow_count": 1},
                {"name": "b.json", "path": "b.json", "type": "workflow", "modified": 5, "size": 9}
            ],
            "config": {"viewMode": "grid", "lastPath": "a"}
        }))
        .expect("parse");

        assert_eq!(listing.items.len(), 2);
        assert_eq!(listing.items[1], DirectoryEntry::document("b.json", 9, 5.0));
        assert_eq!(listing.items[0].kind, EntryKind::Directory);
        let config = listing.config.expect("config");
        assert_eq!(config.view_mode, Some(ViewMode::Grid));
        assert_eq!(config.last_path.as_deref(), Some("a"));
    }

    #[test]
    fn document_response_requires_workflow_field() {
        let doc = parse_document(json!({"success": true, "workflow": {"nodes": [1]}}))
            .expect("document");
        assert_eq!(doc, json!({"nodes": [1]}));
        assert!(parse_document(json!({"success": true})).is_err());
        assert!(parse_document(json!({"success": true, "workflow": null})).is_err());
    }

    #[test]
    fn upload_count_prefers_backend_report() {
        assert_eq!(parse_upload_count(json!({"uploaded": 2}), 3).expect("count"), 2);
        assert_eq!(
            parse_upload_count(json!({"uploaded": ["a.json"]}), 3).expect("count"),
            1
        );
        assert_eq!(parse_upload_count(json!({"success": true}), 3).expect("count"), 3);
        assert!(parse_upload_count(json!({"success": false, "error": "x"}), 3).is_err());
    }

    #[test]
    fn config_writes_use_server_keys() {
        assert_eq!(
            config_body(VIEW_MODE_CONFIG_KEY, ViewMode::List.as_str()),
            json!({"viewMode": "list"})
        );
        assert_eq!(config_body(LAST_PATH_CONFIG_KEY, "a/b"), json!({"lastPath": "a/b"}));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn requests_fail_outside_the_browser() {
        let client = HttpDirectoryClient::default();
        let client_obj: &dyn DirectoryClient = &client;
        assert!(block_on(client_obj.browse("")).is_err());
        assert!(block_on(client_obj.delete("a.json")).is_err());
        assert!(block_on(client_obj.save_view_mode(ViewMode::Grid)).is_err());
        assert_eq!(client.routes(), &ApiRoutes::default());
    }
}
