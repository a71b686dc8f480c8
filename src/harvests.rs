use crate::client::{ClientError, CollectionQuery, RemoteDataClient, SortOrder};
use crate::domain::{Harvest, NewHarvest};

pub const HARVESTS_COLLECTION: &str = "harvests";

/// Relation joined into harvest queries for display purposes.
pub const VARIETY_RELATION: &str = "pearVariety";

/// Fetches the owner's harvests, newest first, with the variety joined.
/// Ordering is applied server-side; the list is never re-sorted here.
pub async fn load_harvests(
    client: &dyn RemoteDataClient,
    token: &str,
    owner_id: &str,
) -> Result<Vec<Harvest>, ClientError> {
    let query = CollectionQuery::new()
        .filter("ownerId", owner_id)
        .include(VARIETY_RELATION)
        .sort("harvestDate", SortOrder::Descending);

    let page = client
        .query_collection(token, HARVESTS_COLLECTION, query)
        .await?;

    page.data
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|error| ClientError::Decode(error.to_string()))
        })
        .collect()
}

/// Creates a harvest record. The response is discarded: it lacks the
/// joined variety needed for display, so the caller refetches the list
/// instead (read-after-write reconciliation).
pub async fn create_harvest(
    client: &dyn RemoteDataClient,
    token: &str,
    new_harvest: &NewHarvest,
) -> Result<(), ClientError> {
    let fields = serde_json::to_value(new_harvest)
        .map_err(|error| ClientError::Decode(error.to_string()))?;
    client
        .create_record(token, HARVESTS_COLLECTION, fields)
        .await?;
    Ok(())
}

pub async fn delete_harvest(
    client: &dyn RemoteDataClient,
    token: &str,
    id: &str,
) -> Result<(), ClientError> {
    client.delete_record(token, HARVESTS_COLLECTION, id).await
}
