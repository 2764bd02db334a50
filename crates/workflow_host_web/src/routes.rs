//! Endpoint layout of the workflow directory backend.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Base URL and route names used by [`crate::HttpDirectoryClient`].
///
/// Missing fields fall back to the stock backend layout, so a host only needs to override the
/// routes it serves differently.
pub struct ApiRoutes {
    /// Prefix joined in front of every route (no trailing slash).
    pub base_url: String,
    /// `GET ?path=` directory listing.
    pub browse: String,
    /// `POST {name, parent_path}`.
    pub create_folder: String,
    /// `POST {old_path, new_name}`.
    pub rename: String,
    /// `POST {path}`.
    pub delete: String,
    /// `POST {source_path, target_dir}`.
    pub move_entry: String,
    /// `POST {source_path, target_dir}`.
    pub copy_entry: String,
    /// `GET ?path=` document body.
    pub read_document: String,
    /// Multipart document upload.
    pub upload_documents: String,
    /// `GET ?path=` preview image.
    pub preview: String,
    /// Multipart preview upload.
    pub upload_preview: String,
    /// `POST {key: value}` panel config write.
    pub save_config: String,
}

impl Default for ApiRoutes {
    fn default() -> Self {
        Self {
            base_url: "/workflow-manager".to_string(),
            browse: "browse".to_string(),
            create_folder: "create-folder".to_string(),
            rename: "rename".to_string(),
            delete: "delete".to_string(),
            move_entry: "move".to_string(),
            copy_entry: "copy".to_string(),
            read_document: "read-workflow".to_string(),
            upload_documents: "upload-workflow".to_string(),
            preview: "preview".to_string(),
            upload_preview: "upload-preview".to_string(),
            save_config: "save-config".to_string(),
        }
    }
}

impl ApiRoutes {
    /// Creates the stock layout under a different base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    /// Joins `route` onto the base URL with exactly one separating slash.
    pub fn url(&self, route: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let route = route.trim_start_matches('/');
        if base.is_empty() {
            format!("/{route}")
        } else {
            format!("{base}/{route}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_match_stock_backend() {
        let routes = ApiRoutes::default();
        assert_eq!(routes.url(&routes.browse), "/workflow-manager/browse");
        assert_eq!(routes.url(&routes.read_document), "/workflow-manager/read-workflow");
        assert_eq!(routes.url(&routes.upload_documents), "/workflow-manager/upload-workflow");
    }

    #[test]
    fn url_joins_with_single_slash() {
        let routes = ApiRoutes::with_base_url("https://host/api/");
        assert_eq!(routes.url("/move"), "https://host/api/move");
        assert_eq!(ApiRoutes::with_base_url("").url("browse"), "/browse");
    }

    #[test]
    fn partial_config_keeps_remaining_defaults() {
        let routes: ApiRoutes =
            serde_json::from_str(r#"{"baseUrl": "/wm", "readDocument": "read"}"#)
                .expect("deserialize");
        assert_eq!(routes.url(&routes.read_document), "/wm/read");
        assert_eq!(routes.url(&routes.copy_entry), "/wm/copy");
    }
}
