//! Shared list helpers.

use crate::error::ClusterError;
use kube::api::{Api, ListParams};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size used for list calls; large clusters return services in chunks.
pub const LIST_PAGE_SIZE: u32 = 500;

/// Lists every object visible through `api`, following continue tokens.
///
/// The result is only returned once all pages have been read, so callers
/// never observe a partial list.
pub async fn list_all<K>(api: &Api<K>) -> Result<Vec<K>, ClusterError>
where
    K: kube::Resource + Clone + DeserializeOwned + std::fmt::Debug,
{
    let mut all_items = Vec::new();
    let mut params = ListParams::default().limit(LIST_PAGE_SIZE);

    loop {
        let page = api.list(&params).await?;
        debug!("Fetched page of {} {} objects", page.items.len(), std::any::type_name::<K>());
        all_items.extend(page.items);

        match page.metadata.continue_.filter(|token| !token.is_empty()) {
            Some(token) => {
                params = params.continue_token(&token);
            }
            None => break,
        }
    }

    Ok(all_items)
}
