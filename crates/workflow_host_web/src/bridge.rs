//! Browser bridge for the workflow directory adapters.
//!
//! This module contains the WASM/JS interop layer (`fetch`, form uploads, toasts, timers, host
//! editor probes, dropped-entry walking) and a non-WASM fallback shim that reports every browser
//! capability as unsupported.

use std::future::Future;

use serde_json::Value;
use workflow_host::{DroppedItem, OpenDocumentRequest, PreviewImage, PreviewUpload, UploadFile};

#[cfg(target_arch = "wasm32")]
mod imp {
    use super::*;
    use js_sys::Promise;
    use serde::de::DeserializeOwned;
    use serde::Serialize;
    use serde_wasm_bindgen::{from_value, Serializer};
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;

    #[wasm_bindgen(inline_js = r#"
const DOCUMENT_EXTENSION = '.json';
const TOAST_LIFETIME_MS = 3000;

function fail(message) {
  throw new Error(message);
}

function withPathQuery(url, path, bustCache) {
  if (path === null || path === undefined) {
    return url;
  }
  let full = `${url}?path=${encodeURIComponent(path)}`;
  if (bustCache) {
    full += `&t=${Date.now()}`;
  }
  return full;
}

async function readJsonResponse(response) {
  let payload = null;
  try {
    payload = await response.json();
  } catch (_) {
    payload = null;
  }
  if (!response.ok) {
    const detail = payload && payload.error ? payload.error : response.statusText;
    fail(`HTTP ${response.status}: ${detail}`);
  }
  if (payload === null || typeof payload !== 'object') {
    fail('backend returned a non-JSON response');
  }
  return payload;
}

function editorApp() {
  return typeof globalThis.app === 'object' && globalThis.app !== null ? globalThis.app : null;
}

function probe(name) {
  const app = editorApp();
  if (!app) {
    return false;
  }
  switch (name) {
    case 'load-graph-data':
      return typeof app.loadGraphData === 'function';
    case 'workflow-store':
      return !!app.workflowStore && typeof app.workflowStore.openWorkflow === 'function';
    case 'workflow-service':
      return !!app.workflowService && typeof app.workflowService.openWorkflow === 'function';
    case 'synthetic-file':
      return typeof app.handleFile === 'function';
    default:
      return false;
  }
}

function parentDir(path) {
  const idx = path.lastIndexOf('/');
  return idx > 0 ? path.substring(0, idx) : '';
}

async function openInEditor(name, request) {
  const app = editorApp();
  if (!app || !probe(name)) {
    fail(`editor strategy ${name} is unavailable`);
  }
  const { path, title, document } = request;
  switch (name) {
    case 'load-graph-data':
      await app.loadGraphData(document, true, true, path);
      return null;
    case 'workflow-store':
      await app.workflowStore.openWorkflow({
        path,
        key: title,
        isPersisted: true,
        isModified: false,
        workflow: document,
        directory: parentDir(path),
        filename: `${title}${DOCUMENT_EXTENSION}`,
      });
      return null;
    case 'workflow-service':
      await app.workflowService.openWorkflow({
        ...document,
        path,
        filename: title,
        source: 'file',
        originalPath: path,
      });
      return null;
    case 'synthetic-file': {
      const blob = new Blob([JSON.stringify(document)], { type: 'application/json' });
      const file = new File([blob], `${title}${DOCUMENT_EXTENSION}`, { type: 'application/json' });
      for (const key of ['fullPath', 'webkitRelativePath', 'originalPath']) {
        try {
          Object.defineProperty(file, key, { value: path, writable: false, configurable: true });
        } catch (_) {
          // Frozen File properties are left as-is.
        }
      }
      await app.handleFile(file);
      return null;
    }
    default:
      fail(`unknown editor strategy ${name}`);
  }
}

function fileFromEntry(entry) {
  return new Promise((resolve, reject) => entry.file(resolve, reject));
}

function readAllEntries(reader) {
  return new Promise((resolve, reject) => {
    const all = [];
    const next = () => {
      reader.readEntries((batch) => {
        if (batch.length === 0) {
          resolve(all);
        } else {
          all.push(...batch);
          next();
        }
      }, reject);
    };
    next();
  });
}

async function walkEntry(entry) {
  if (entry.isFile) {
    const file = await fileFromEntry(entry);
    return { kind: 'file', name: file.name, text: await file.text() };
  }
  if (entry.isDirectory) {
    const children = [];
    for (const child of await readAllEntries(entry.createReader())) {
      try {
        children.push(await walkEntry(child));
      } catch (err) {
        console.warn('workflow-panel: skipped unreadable dropped entry', child.name, err);
      }
    }
    return { kind: 'directory', name: entry.name, children };
  }
  return null;
}

export async function jsJsonRequest(method, url, path, body) {
  const init = { method };
  if (body !== null && body !== undefined) {
    init.headers = { 'Content-Type': 'application/json' };
    init.body = JSON.stringify(body);
  }
  const response = await fetch(withPathQuery(url, path, false), init);
  return await readJsonResponse(response);
}

export async function jsUploadDocuments(url, targetDir, files, createDirs) {
  const form = new FormData();
  form.append('target_dir', targetDir);
  form.append('create_dirs', createDirs ? 'true' : 'false');
  for (const file of files) {
    form.append('workflow_files', new File([file.text], file.name, { type: 'application/json' }));
  }
  const response = await fetch(url, { method: 'POST', body: form });
  return await readJsonResponse(response);
}

export async function jsFetchPreview(url, path) {
  const response = await fetch(withPathQuery(url, path, true));
  if (response.status === 404) {
    return null;
  }
  if (!response.ok) {
    fail(`HTTP ${response.status}: ${response.statusText}`);
  }
  const contentType = response.headers.get('Content-Type') || '';
  if (!contentType.startsWith('image/')) {
    return null;
  }
  const buffer = await response.arrayBuffer();
  return { content_type: contentType, bytes: Array.from(new Uint8Array(buffer)) };
}

export async function jsUploadPreview(url, path, upload) {
  const form = new FormData();
  form.append('workflow_path', path);
  const blob = new Blob([new Uint8Array(upload.bytes)], { type: upload.content_type });
  form.append('preview_file', new File([blob], upload.file_name, { type: upload.content_type }));
  const response = await fetch(url, { method: 'POST', body: form });
  return await readJsonResponse(response);
}

export async function jsPickImage() {
  if (typeof document === 'undefined') {
    fail('document is unavailable');
  }
  const input = document.createElement('input');
  input.type = 'file';
  input.accept = 'image/*';
  input.style.display = 'none';
  document.body.appendChild(input);
  try {
    const file = await new Promise((resolve) => {
      const picked = () => resolve(input.files && input.files[0]);
      input.addEventListener('change', picked, { once: true });
      input.addEventListener('cancel', () => resolve(null), { once: true });
      input.click();
    });
    if (!file) {
      return null;
    }
    const buffer = await file.arrayBuffer();
    return {
      file_name: file.name,
      content_type: file.type || '',
      bytes: Array.from(new Uint8Array(buffer)),
    };
  } finally {
    input.remove();
  }
}

export function jsShowToast(level, message) {
  if (typeof document === 'undefined' || !document.body) {
    console.info(`workflow-panel [${level}]: ${message}`);
    return;
  }
  const toast = document.createElement('div');
  toast.className = `workflow-toast workflow-toast--${level}`;
  toast.setAttribute('role', level === 'error' ? 'alert' : 'status');
  toast.textContent = message;
  document.body.appendChild(toast);
  setTimeout(() => toast.remove(), TOAST_LIFETIME_MS);
}

export function jsPreviewObjectUrl(image) {
  const blob = new Blob([new Uint8Array(image.bytes)], { type: image.content_type });
  return URL.createObjectURL(blob);
}

export function jsRevokeObjectUrl(url) {
  URL.revokeObjectURL(url);
}

export function jsSleep(ms) {
  return new Promise((resolve) => setTimeout(resolve, ms));
}

export function jsEditorProbe(name) {
  return probe(name);
}

export async function jsOpenInEditor(name, request) {
  return await openInEditor(name, request);
}

export async function jsReadDroppedItems(dataTransfer) {
  const items = [];
  const list = dataTransfer && dataTransfer.items ? Array.from(dataTransfer.items) : [];
  const walkable = list.length > 0 && typeof list[0].webkitGetAsEntry === 'function';
  if (walkable) {
    const entries = list
      .filter((item) => item.kind === 'file')
      .map((item) => item.webkitGetAsEntry())
      .filter((entry) => !!entry);
    for (const entry of entries) {
      try {
        const walked = await walkEntry(entry);
        if (walked) {
          items.push(walked);
        }
      } catch (err) {
        console.warn('workflow-panel: skipped unreadable dropped entry', entry.name, err);
      }
    }
    return items;
  }
  const files = dataTransfer && dataTransfer.files ? Array.from(dataTransfer.files) : [];
  for (const file of files) {
    items.push({ kind: 'file', name: file.name, text: await file.text() });
  }
  return items;
}
"#)]
    extern "C" {
        #[wasm_bindgen(js_name = jsJsonRequest)]
        fn js_json_request(method: &str, url: &str, path: JsValue, body: JsValue) -> Promise;
        #[wasm_bindgen(js_name = jsUploadDocuments)]
        fn js_upload_documents(
            url: &str,
            target_dir: &str,
            files: JsValue,
            create_dirs: bool,
        ) -> Promise;
        #[wasm_bindgen(js_name = jsFetchPreview)]
        fn js_fetch_preview(url: &str, path: &str) -> Promise;
        #[wasm_bindgen(js_name = jsUploadPreview)]
        fn js_upload_preview(url: &str, path: &str, upload: JsValue) -> Promise;
        #[wasm_bindgen(js_name = jsPickImage)]
        fn js_pick_image() -> Promise;
        #[wasm_bindgen(js_name = jsShowToast)]
        fn js_show_toast(level: &str, message: &str);
        #[wasm_bindgen(catch, js_name = jsPreviewObjectUrl)]
        fn js_preview_object_url(image: JsValue) -> Result<String, JsValue>;
        #[wasm_bindgen(js_name = jsRevokeObjectUrl)]
        fn js_revoke_object_url(url: &str);
        #[wasm_bindgen(js_name = jsSleep)]
        fn js_sleep(ms: u32) -> Promise;
        #[wasm_bindgen(js_name = jsEditorProbe)]
        fn js_editor_probe(name: &str) -> bool;
        #[wasm_bindgen(js_name = jsOpenInEditor)]
        fn js_open_in_editor(name: &str, request: JsValue) -> Promise;
        #[wasm_bindgen(js_name = jsReadDroppedItems)]
        fn js_read_dropped_items(data_transfer: &JsValue) -> Promise;
    }

    async fn await_promise(promise: Promise) -> Result<JsValue, String> {
        JsFuture::from(promise).await.map_err(js_error_to_string)
    }

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
        value
            .serialize(&Serializer::json_compatible())
            .map_err(|e| e.to_string())
    }

    async fn promise_to_json<T: DeserializeOwned>(promise: Promise) -> Result<T, String> {
        let value = await_promise(promise).await?;
        from_value(value).map_err(|e| e.to_string())
    }

    async fn promise_to_optional_json<T: DeserializeOwned>(
        promise: Promise,
    ) -> Result<Option<T>, String> {
        let value = await_promise(promise).await?;
        if value.is_null() || value.is_undefined() {
            Ok(None)
        } else {
            from_value(value).map(Some).map_err(|e| e.to_string())
        }
    }

    pub async fn json_request(
        method: &str,
        url: &str,
        path: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, String> {
        let path = path.map(JsValue::from_str).unwrap_or(JsValue::NULL);
        let body = match body {
            Some(body) => to_js(body)?,
            None => JsValue::NULL,
        };
        promise_to_json(js_json_request(method, url, path, body)).await
    }

    pub async fn upload_documents(
        url: &str,
        target_dir: &str,
        files: &[UploadFile],
        create_dirs: bool,
    ) -> Result<Value, String> {
        let files = to_js(files)?;
        promise_to_json(js_upload_documents(url, target_dir, files, create_dirs)).await
    }

    pub async fn fetch_preview(url: &str, path: &str) -> Result<Option<PreviewImage>, String> {
        promise_to_optional_json(js_fetch_preview(url, path)).await
    }

    pub async fn upload_preview(
        url: &str,
        path: &str,
        upload: &PreviewUpload,
    ) -> Result<Value, String> {
        let upload = to_js(upload)?;
        promise_to_json(js_upload_preview(url, path, upload)).await
    }

    pub async fn pick_image() -> Result<Option<PreviewUpload>, String> {
        promise_to_optional_json(js_pick_image()).await
    }

    pub fn show_toast(level: &str, message: &str) -> Result<(), String> {
        js_show_toast(level, message);
        Ok(())
    }

    pub fn preview_object_url(image: &PreviewImage) -> Result<String, String> {
        js_preview_object_url(to_js(image)?).map_err(js_error_to_string)
    }

    pub fn revoke_object_url(url: &str) {
        js_revoke_object_url(url);
    }

    pub async fn sleep_ms(ms: u32) -> Result<(), String> {
        let _ = await_promise(js_sleep(ms)).await?;
        Ok(())
    }

    pub fn editor_probe(strategy: &str) -> bool {
        js_editor_probe(strategy)
    }

    pub async fn open_in_editor(
        strategy: &str,
        request: &OpenDocumentRequest,
    ) -> Result<(), String> {
        let request = to_js(request)?;
        let _ = await_promise(js_open_in_editor(strategy, request)).await?;
        Ok(())
    }

    pub fn read_dropped_items(
        data_transfer: &JsValue,
    ) -> impl Future<Output = Result<Vec<DroppedItem>, String>> + 'static {
        let promise = js_read_dropped_items(data_transfer);
        async move { promise_to_json(promise).await }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::*;

    fn unsupported() -> String {
        "Browser workflow APIs are only available when compiled for wasm32".to_string()
    }

    pub async fn json_request(
        _method: &str,
        _url: &str,
        _path: Option<&str>,
        _body: Option<&Value>,
    ) -> Result<Value, String> {
        Err(unsupported())
    }

    pub async fn upload_documents(
        _url: &str,
        _target_dir: &str,
        _files: &[UploadFile],
        _create_dirs: bool,
    ) -> Result<Value, String> {
        Err(unsupported())
    }

    pub async fn fetch_preview(_url: &str, _path: &str) -> Result<Option<PreviewImage>, String> {
        Err(unsupported())
    }

    pub async fn upload_preview(
        _url: &str,
        _path: &str,
        _upload: &PreviewUpload,
    ) -> Result<Value, String> {
        Err(unsupported())
    }

    pub async fn pick_image() -> Result<Option<PreviewUpload>, String> {
        Err(unsupported())
    }

    pub fn show_toast(_level: &str, _message: &str) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn preview_object_url(_image: &PreviewImage) -> Result<String, String> {
        Err(unsupported())
    }

    pub fn revoke_object_url(_url: &str) {}

    pub async fn sleep_ms(_ms: u32) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn editor_probe(_strategy: &str) -> bool {
        false
    }

    pub async fn open_in_editor(
        _strategy: &str,
        _request: &OpenDocumentRequest,
    ) -> Result<(), String> {
        Err(unsupported())
    }

    pub fn read_dropped_items(
        _data_transfer: &wasm_bindgen::JsValue,
    ) -> impl Future<Output = Result<Vec<DroppedItem>, String>> + 'static {
        std::future::ready(Err(unsupported()))
    }
}

pub async fn json_request(
    method: &str,
    url: &str,
    path: Option<&str>,
    body: Option<&Value>,
) -> Result<Value, String> {
    imp::json_request(method, url, path, body).await
}

pub async fn upload_documents(
    url: &str,
    target_dir: &str,
    files: &[UploadFile],
    create_dirs: bool,
) -> Result<Value, String> {
    imp::upload_documents(url, target_dir, files, create_dirs).await
}

pub async fn fetch_preview(url: &str, path: &str) -> Result<Option<PreviewImage>, String> {
    imp::fetch_preview(url, path).await
}

pub async fn upload_preview(
    url: &str,
    path: &str,
    upload: &PreviewUpload,
) -> Result<Value, String> {
    imp::upload_preview(url, path, upload).await
}

pub async fn pick_image() -> Result<Option<PreviewUpload>, String> {
    imp::pick_image().await
}

pub fn show_toast(level: &str, message: &str) -> Result<(), String> {
    imp::show_toast(level, message)
}

pub fn preview_object_url(image: &PreviewImage) -> Result<String, String> {
    imp::preview_object_url(image)
}

pub fn revoke_object_url(url: &str) {
    imp::revoke_object_url(url)
}

pub async fn sleep_ms(ms: u32) -> Result<(), String> {
    imp::sleep_ms(ms).await
}

pub fn editor_probe(strategy: &str) -> bool {
    imp::editor_probe(strategy)
}

pub async fn open_in_editor(strategy: &str, request: &OpenDocumentRequest) -> Result<(), String> {
    imp::open_in_editor(strategy, request).await
}

/// Starts walking the drop synchronously; `DataTransfer` items are unreadable once the drop
/// event handler returns.
pub fn read_dropped_items(
    data_transfer: &wasm_bindgen::JsValue,
) -> impl Future<Output = Result<Vec<DroppedItem>, String>> + 'static {
    imp::read_dropped_items(data_transfer)
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn bridge_public_api_non_wasm_parity() {
        let expected = "Browser workflow APIs are only available when compiled for wasm32";
        let request = OpenDocumentRequest::new("a.json", json!({}));

        assert_eq!(
            block_on(json_request("GET", "/workflow-manager/browse", Some(""), None))
                .expect_err("request should fail"),
            expected
        );
        assert_eq!(
            block_on(fetch_preview("/workflow-manager/preview", "a.json"))
                .expect_err("preview should fail"),
            expected
        );
        assert_eq!(
            block_on(open_in_editor("load-graph-data", &request)).expect_err("open should fail"),
            expected
        );
        assert_eq!(block_on(sleep_ms(1)).expect_err("sleep should fail"), expected);
        assert!(show_toast("info", "hello").is_err());
        assert!(!editor_probe("load-graph-data"));
    }
}
