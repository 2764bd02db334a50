//! Text shown for rows, crumbs, and the status bar.

use workflow_host::{
    file_name, format_date, format_file_size, strip_extension, DirectoryEntry, EntryKind,
    DOCUMENT_EXTENSION,
};
use workflow_panel::{PanelStatus, SelectionProperties, SortKey, SortOrder};

pub(crate) const ROOT_LABEL: &str = "Workflows";

/// Label shown for a row: documents drop their extension.
pub(crate) fn row_label(entry: &DirectoryEntry) -> &str {
    match entry.kind {
        EntryKind::Directory => &entry.name,
        EntryKind::Document => strip_extension(&entry.name, DOCUMENT_EXTENSION),
    }
}

pub(crate) fn row_meta(entry: &DirectoryEntry) -> String {
    match entry.kind {
        EntryKind::Directory => match entry.child_document_count {
            Some(1) => "1 workflow".to_string(),
            Some(count) => format!("{count} workflows"),
            None => String::new(),
        },
        EntryKind::Document => {
            let size = entry.size.map(format_file_size).unwrap_or_default();
            let date = format_date(entry.modified);
            match (size.is_empty(), date.is_empty()) {
                (false, false) => format!("{size} · {date}"),
                (true, _) => date,
                (false, true) => size,
            }
        }
    }
}

/// Prefilled text of the rename prompt.
pub(crate) fn rename_seed(path: &str) -> String {
    strip_extension(file_name(path), DOCUMENT_EXTENSION).to_string()
}

pub(crate) fn crumb_label(label: &str) -> &str {
    if label.is_empty() {
        ROOT_LABEL
    } else {
        label
    }
}

pub(crate) fn status_line(status: PanelStatus) -> String {
    let mut line = if status.visible == status.total {
        format!("{} item(s)", status.total)
    } else {
        format!("{} of {} item(s)", status.visible, status.total)
    };
    if status.selected > 0 {
        line.push_str(&format!(", {} selected", status.selected));
    }
    line
}

/// Body of the properties dialog: full details for one entry, a summary and list for several.
pub(crate) fn properties_text(properties: &SelectionProperties) -> String {
    if let Some(entry) = properties.single() {
        let mut lines = vec![
            format!("Name: {}", row_label(entry)),
            format!("Path: {}", entry.path),
        ];
        match entry.kind {
            EntryKind::Directory => {
                lines.push("Type: Folder".to_string());
                lines.push(format!("Workflows: {}", entry.child_document_count.unwrap_or(0)));
            }
            EntryKind::Document => {
                lines.push("Type: Workflow".to_string());
                lines.push(format!("Size: {}", format_file_size(entry.size.unwrap_or(0))));
            }
        }
        lines.push(format!("Modified: {}", format_date(entry.modified)));
        return lines.join("\n");
    }

    let mut lines = vec![
        format!("{} items selected", properties.entries.len()),
        format!("Folders: {}", properties.folders),
        format!("Workflows: {}", properties.documents),
    ];
    if properties.documents > 0 {
        lines.push(format!("Total size: {}", format_file_size(properties.total_size)));
    }
    if properties.folders > 0 {
        lines.push(format!("Workflows in folders: {}", properties.nested_documents));
    }
    lines.push(String::new());
    lines.extend(properties.entries.iter().map(|entry| entry.path.clone()));
    lines.join("\n")
}

pub(crate) fn sort_label(key: SortKey, order: SortOrder) -> String {
    let arrow = match order {
        SortOrder::Asc => "↑",
        SortOrder::Desc => "↓",
    };
    let name = match key {
        SortKey::Name => "Name",
        SortKey::Modified => "Modified",
        SortKey::Size => "Size",
    };
    format!("{name} {arrow}")
}
