use crate::client::{ClientError, CollectionQuery, RemoteDataClient};
use crate::domain::Variety;

pub const VARIETIES_COLLECTION: &str = "pearvarieties";

/// Fetches the full variety catalog. No filter, no pagination: the
/// catalog is a small, complete reference list in a single response.
pub async fn load_varieties(
    client: &dyn RemoteDataClient,
    token: &str,
) -> Result<Vec<Variety>, ClientError> {
    let page = client
        .query_collection(token, VARIETIES_COLLECTION, CollectionQuery::new())
        .await?;

    page.data
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|error| ClientError::Decode(error.to_string()))
        })
        .collect()
}
