//! Relative-path helpers for the workflow directory tree.
//!
//! Paths handled here are the backend's keys: slash-separated, relative to the workflow root,
//! with the empty string standing for the root itself.

/// Normalizes a directory-tree path to the backend key form.
///
/// Backslashes become `/`, empty and `.` segments are dropped, `..` pops a segment, and leading or
/// trailing slashes are removed. The root normalizes to `""`.
pub fn normalize_tree_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let replaced = path.trim().replace('\\', "/");
    for segment in replaced.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Joins a parent directory and a child name; an empty parent yields the bare name.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Returns the parent directory of `path` (`""` for top-level entries and the root).
pub fn parent_path(path: &str) -> String {
    match path.trim_end_matches('/').rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Returns the last path segment.
pub fn file_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Returns `true` when `path` is `ancestor` itself or lies somewhere beneath it.
pub fn is_same_or_descendant(path: &str, ancestor: &str) -> bool {
    path == ancestor || is_strict_descendant(path, ancestor)
}

/// Returns `true` when `path` lies strictly beneath `ancestor`.
///
/// The root (`""`) is the ancestor of every non-empty path.
pub fn is_strict_descendant(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return !path.is_empty();
    }
    path.len() > ancestor.len() + 1
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'/'
}

/// Returns `true` when `target` equals or descends from any of `sources`.
pub fn is_within_any<S: AsRef<str>>(target: &str, sources: &[S]) -> bool {
    sources
        .iter()
        .any(|source| is_same_or_descendant(target, source.as_ref()))
}

/// Returns `true` when `path` ends with `.{extension}`, ignoring ASCII case.
pub fn has_extension(path: &str, extension: &str) -> bool {
    let name = file_name(path);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx + 1..].eq_ignore_ascii_case(extension),
        _ => false,
    }
}

/// Strips `.{extension}` (ASCII case-insensitive) from the end of `path` when present.
pub fn strip_extension<'a>(path: &'a str, extension: &str) -> &'a str {
    if has_extension(path, extension) {
        &path[..path.len() - extension.len() - 1]
    } else {
        path
    }
}

/// One clickable breadcrumb segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Display label (`""` for the root crumb; renderers pick their own root label).
    pub label: String,
    /// Directory path the crumb navigates to.
    pub path: String,
}

/// Builds the breadcrumb trail for `path`, root first.
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let mut trail = vec![Breadcrumb {
        label: String::new(),
        path: String::new(),
    }];
    let mut current = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = join_path(&current, segment);
        trail.push(Breadcrumb {
            label: segment.to_string(),
            path: current.clone(),
        });
    }
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_tree_path_matches_expected_cases() {
        let cases = [
            ("", ""),
            ("   ", ""),
            ("foo/bar", "foo/bar"),
            ("/foo//bar/", "foo/bar"),
            ("./foo/../bar", "bar"),
            ("\\foo\\bar", "foo/bar"),
            ("/../../", ""),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_tree_path(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn join_and_parent_handle_root() {
        assert_eq!(join_path("", "a.json"), "a.json");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
        assert_eq!(join_path("a/", "c"), "a/c");
        assert_eq!(parent_path("a/b/c.json"), "a/b");
        assert_eq!(parent_path("a"), "");
        assert_eq!(parent_path(""), "");
        assert_eq!(file_name("a/b/c.json"), "c.json");
        assert_eq!(file_name("top"), "top");
    }

    #[test]
    fn descendant_checks_require_a_segment_boundary() {
        assert!(is_same_or_descendant("a", "a"));
        assert!(is_same_or_descendant("a/sub", "a"));
        assert!(is_same_or_descendant("a/sub/deeper", "a"));
        assert!(!is_same_or_descendant("ab", "a"));
        assert!(!is_same_or_descendant("a", "a/sub"));
        assert!(!is_strict_descendant("a", "a"));
        assert!(is_strict_descendant("x", ""));
        assert!(is_within_any("a/sub", &["z", "a"]));
        assert!(!is_within_any("b", &["a", "c"]));
    }

    #[test]
    fn extension_helpers_ignore_case() {
        assert!(has_extension("dir/flow.JSON", "json"));
        assert!(!has_extension("dir/flow.json.bak", "json"));
        assert!(!has_extension(".json", "json"));
        assert!(!has_extension("json", "json"));
        assert_eq!(strip_extension("dir/flow.Json", "json"), "dir/flow");
        assert_eq!(strip_extension("dir/flow", "json"), "dir/flow");
    }

    #[test]
    fn breadcrumbs_accumulate_segments() {
        let trail = breadcrumbs("a/b");
        let paths: Vec<_> = trail.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["", "a", "a/b"]);
        assert_eq!(trail[2].label, "b");
        assert_eq!(breadcrumbs("").len(), 1);
    }
}
