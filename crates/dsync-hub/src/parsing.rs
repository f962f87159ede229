//! Conversion from wire responses to port DTOs.

use dsync_core::{DatasetId, FileListPage, RemoteFile};

use crate::error::{HubError, HubResult};
use crate::models::{FileListResponse, WireFile};

/// Convert one listing page into the port DTO.
///
/// A `hasNext` page without a cursor is passed through as-is; the caller
/// decides whether that ends pagination.
pub fn parse_file_list(response: FileListResponse) -> HubResult<FileListPage> {
    let items = response
        .list
        .into_iter()
        .map(parse_wire_file)
        .collect::<HubResult<Vec<_>>>()?;

    Ok(FileListPage {
        items,
        has_more: response.has_next,
        next_cursor: response.after.filter(|c| !c.is_empty()),
    })
}

fn parse_wire_file(file: WireFile) -> HubResult<RemoteFile> {
    let dataset_id = file.dataset_id.map(parse_dataset_id).transpose()?;
    Ok(RemoteFile {
        path: file.path,
        size: file.size,
        sha256: file.sha256.filter(|h| !h.is_empty()),
        dataset_id,
    })
}

/// Dataset ids arrive as numbers from older hubs and as strings from newer ones.
fn parse_dataset_id(value: serde_json::Value) -> HubResult<DatasetId> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Ok(DatasetId::new(s)),
        serde_json::Value::Number(n) => Ok(DatasetId::new(n.to_string())),
        other => Err(HubError::InvalidResponse {
            message: format!("unexpected dataset_id value: {other}"),
        }),
    }
}
