//! Resolution of a folder's ancestor chain.

use std::collections::HashSet;

use tracing::debug;

use datahub_client::ResourceApi;
use datahub_core::AppError;
use datahub_core::result::AppResult;
use datahub_entity::{Folder, Resource, ResourceKind};

/// Fetch parents of `folder` until a collection or user is reached.
///
/// Returns the path root first, ending with `folder`. A parent chain
/// that revisits a folder is reported as a conflict.
pub async fn resolve_ancestors(api: &dyn ResourceApi, folder: Folder) -> AppResult<Vec<Resource>> {
    let mut seen = HashSet::new();
    seen.insert(folder.id.clone());
    let mut parent = folder.parent_ref();
    let mut path = vec![Resource::Folder(folder)];

    loop {
        if parent.kind == ResourceKind::Folder && !seen.insert(parent.id.clone()) {
            return Err(AppError::conflict(format!(
                "Folder hierarchy loops back to folder {}",
                parent.id
            )));
        }
        debug!(parent = %parent, "Fetching ancestor");
        let resource = api.fetch(&parent).await?;
        let next = match &resource {
            Resource::Folder(f) => Some(f.parent_ref()),
            r if r.kind().is_root() => None,
            r => {
                return Err(AppError::validation(format!(
                    "A folder cannot live under a {}",
                    r.kind()
                )));
            }
        };
        path.push(resource);
        match next {
            Some(next) => parent = next,
            None => break,
        }
    }

    path.reverse();
    Ok(path)
}
