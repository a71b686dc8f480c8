use crate::catalog;
use crate::client::RemoteDataClient;
use crate::domain::{Harvest, HarvestForm, Variety};
use crate::harvests;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::error;

/// Everything the dashboard screen renders from: reference catalog,
/// the owner's harvest list, the create form and the current banner
/// message. Mutated only in response to completed remote calls.
#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub varieties: Vec<Variety>,
    pub harvests: Vec<Harvest>,
    pub form: HarvestForm,
    pub error: Option<String>,
}

impl DashboardState {
    /// Initial load: catalog and harvests are fetched concurrently and
    /// both awaited. Each failure becomes its own banner message and
    /// never blocks the other list from rendering.
    pub async fn load(client: &dyn RemoteDataClient, token: &str, owner_id: &str) -> Self {
        let mut state = Self::default();

        let (varieties, harvests) = tokio::join!(
            catalog::load_varieties(client, token),
            harvests::load_harvests(client, token, owner_id),
        );

        match varieties {
            Ok(varieties) => state.varieties = varieties,
            Err(err) => {
                error!("Error fetching pear varieties: {err}");
                state.error = Some("Could not load pear varieties.".to_string());
            }
        }
        match harvests {
            Ok(harvests) => state.harvests = harvests,
            Err(err) => {
                error!("Error fetching harvests: {err}");
                state.error = Some("Could not load your harvests.".to_string());
            }
        }

        state
    }

    /// Submits the current form. Local validation failures never issue
    /// a remote call. After a successful create the harvest list is
    /// refetched in full (the create response lacks the joined variety)
    /// and the form resets to its defaults. On failure the input stays
    /// put for correction.
    pub async fn submit(&mut self, client: &dyn RemoteDataClient, token: &str, owner_id: &str) {
        self.error = None;

        let new_harvest = match self.form.validate(owner_id) {
            Ok(new_harvest) => new_harvest,
            Err(message) => {
                self.error = Some(message);
                return;
            }
        };

        if let Err(err) = harvests::create_harvest(client, token, &new_harvest).await {
            error!("Error creating harvest: {err}");
            self.error = Some("Failed to create harvest. Please check your input.".to_string());
            return;
        }

        self.form = HarvestForm::default();
        match harvests::load_harvests(client, token, owner_id).await {
            Ok(harvests) => self.harvests = harvests,
            Err(err) => {
                error!("Error fetching harvests: {err}");
                self.error = Some("Could not load your harvests.".to_string());
            }
        }
    }

    /// Deletes a harvest after explicit confirmation. Without it,
    /// nothing happens at all. On success the record is spliced out of
    /// local state by id; no refetch. On failure the record stays.
    pub async fn delete(
        &mut self,
        client: &dyn RemoteDataClient,
        token: &str,
        id: &str,
        confirmed: bool,
    ) {
        if !confirmed {
            return;
        }
        self.error = None;

        match harvests::delete_harvest(client, token, id).await {
            Ok(()) => self.harvests.retain(|harvest| harvest.id != id),
            Err(err) => {
                error!("Error deleting harvest: {err}");
                self.error = Some("Failed to delete harvest.".to_string());
            }
        }
    }
}

/// How long a cached dashboard survives without being touched.
/// Sessions that end without a logout (closed tab, expired token)
/// must not pin their state in memory forever.
const STATE_TTL: Duration = Duration::from_secs(30 * 60);

struct CachedState {
    state: DashboardState,
    stored_at: Instant,
}

/// Per-session dashboard state, keyed by session token, so mutations
/// can work on the state the user is looking at instead of refetching.
/// Entries expire after [`STATE_TTL`]; expired ones are dropped on
/// every insert and never handed back by `take`.
pub struct DashboardStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, CachedState>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::with_ttl(STATE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Removes and returns the cached state for this session, unless
    /// the entry has already expired.
    pub fn take(&self, token: &str) -> Option<DashboardState> {
        let entry = self.inner.lock().unwrap().remove(token)?;
        (entry.stored_at.elapsed() < self.ttl).then_some(entry.state)
    }

    pub fn put(&self, token: &str, state: DashboardState) {
        let mut inner = self.inner.lock().unwrap();
        inner.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
        inner.insert(
            token.to_string(),
            CachedState {
                state,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn remove(&self, token: &str) {
        self.inner.lock().unwrap().remove(token);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VARIETIES_COLLECTION;
    use crate::client::mock::MockClient;
    use crate::harvests::HARVESTS_COLLECTION;
    use chrono::Local;
    use serde_json::json;

    const TOKEN: &str = "t-1";
    const OWNER: &str = "u1";

    fn variety_record(id: &str, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "flavorProfile": "sweet and juicy",
            "origin": "England",
            "description": "A classic dessert pear."
        })
    }

    fn harvest_record(id: &str, date: &str) -> serde_json::Value {
        json!({
            "id": id,
            "pearVarietyId": "v1",
            "ownerId": OWNER,
            "harvestDate": date,
            "quantity": 12.5,
            "qualityRating": 4,
            "pearVariety": variety_record("v1", "Bartlett")
        })
    }

    fn seeded_client() -> MockClient {
        MockClient::new()
            .with_collection(VARIETIES_COLLECTION, vec![variety_record("v1", "Bartlett")])
            .with_collection(
                HARVESTS_COLLECTION,
                vec![
                    harvest_record("h1", "2024-05-02"),
                    harvest_record("h2", "2024-05-01"),
                ],
            )
    }

    #[tokio::test]
    async fn load_fetches_both_lists_concurrently_awaited() {
        let client = seeded_client();
        let state = DashboardState::load(&client, TOKEN, OWNER).await;

        assert_eq!(state.varieties.len(), 1);
        assert_eq!(state.harvests.len(), 2);
        assert_eq!(state.error, None);
        assert_eq!(client.query_count(VARIETIES_COLLECTION), 1);
        assert_eq!(client.query_count(HARVESTS_COLLECTION), 1);
    }

    #[tokio::test]
    async fn catalog_failure_does_not_block_harvests() {
        let client = seeded_client().failing_collection(VARIETIES_COLLECTION);
        let state = DashboardState::load(&client, TOKEN, OWNER).await;

        assert!(state.varieties.is_empty());
        assert_eq!(state.harvests.len(), 2);
        assert_eq!(state.error.as_deref(), Some("Could not load pear varieties."));
    }

    #[tokio::test]
    async fn harvest_failure_leaves_the_catalog_rendered() {
        let client = seeded_client().failing_collection(HARVESTS_COLLECTION);
        let state = DashboardState::load(&client, TOKEN, OWNER).await;

        assert_eq!(state.varieties.len(), 1);
        assert!(state.harvests.is_empty());
        assert_eq!(state.error.as_deref(), Some("Could not load your harvests."));
    }

    #[tokio::test]
    async fn invalid_form_never_issues_a_remote_call() {
        let client = seeded_client();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.form.quantity = "12.5".to_string();
        state.form.pear_variety_id = String::new();
        state.submit(&client, TOKEN, OWNER).await;

        assert_eq!(client.create_count(), 0);
        // no reload either
        assert_eq!(client.query_count(HARVESTS_COLLECTION), 1);
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn successful_create_reloads_the_list_and_resets_the_form() {
        let client = MockClient::new()
            .with_collection(VARIETIES_COLLECTION, vec![variety_record("v1", "Bartlett")])
            .with_collection(HARVESTS_COLLECTION, vec![]);
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.form.pear_variety_id = "v1".to_string();
        state.form.quantity = "12.5".to_string();
        state.form.harvest_date = "2024-05-01".to_string();
        state.submit(&client, TOKEN, OWNER).await;

        let submitted = client.last_created().unwrap();
        assert_eq!(submitted["quantity"], json!(12.5));
        assert_eq!(submitted["qualityRating"], json!(3));

        // read-after-write: one initial fetch, one reload
        assert_eq!(client.query_count(HARVESTS_COLLECTION), 2);
        assert_eq!(state.harvests.len(), 1);
        assert_eq!(state.error, None);

        assert_eq!(state.form.quantity, "");
        assert_eq!(state.form.pear_variety_id, "");
        assert_eq!(
            state.form.harvest_date,
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        );
        assert_eq!(state.form.quality_rating, "3");
    }

    #[tokio::test]
    async fn failed_reload_after_create_shows_a_banner_but_resets_the_form() {
        let client = seeded_client();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.form.pear_variety_id = "v1".to_string();
        state.form.quantity = "7".to_string();
        client.fail_queries(HARVESTS_COLLECTION);
        state.submit(&client, TOKEN, OWNER).await;

        // the record was created even though the reload failed
        assert_eq!(client.create_count(), 1);
        assert_eq!(state.error.as_deref(), Some("Could not load your harvests."));
        assert_eq!(state.form.quantity, "");
        assert_eq!(state.form.pear_variety_id, "");
        // the list keeps what was last fetched successfully
        assert_eq!(state.harvests.len(), 2);
    }

    #[tokio::test]
    async fn failed_create_keeps_the_form_for_correction() {
        let client = seeded_client().failing_create();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.form.pear_variety_id = "v1".to_string();
        state.form.quantity = "7".to_string();
        state.submit(&client, TOKEN, OWNER).await;

        assert_eq!(
            state.error.as_deref(),
            Some("Failed to create harvest. Please check your input.")
        );
        assert_eq!(state.form.quantity, "7");
        assert_eq!(state.form.pear_variety_id, "v1");
        // no reload after a failed create
        assert_eq!(client.query_count(HARVESTS_COLLECTION), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_splices_locally_without_refetch() {
        let client = seeded_client();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.delete(&client, TOKEN, "h1", true).await;

        assert_eq!(client.delete_count(), 1);
        assert!(state.harvests.iter().all(|h| h.id != "h1"));
        assert_eq!(state.harvests.len(), 1);
        assert_eq!(client.query_count(HARVESTS_COLLECTION), 1);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn unconfirmed_delete_does_nothing_at_all() {
        let client = seeded_client();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.delete(&client, TOKEN, "h9", false).await;

        assert_eq!(client.delete_count(), 0);
        assert_eq!(state.harvests.len(), 2);
    }

    #[tokio::test]
    async fn failed_delete_leaves_the_record_in_place() {
        let client = seeded_client().failing_delete();
        let mut state = DashboardState::load(&client, TOKEN, OWNER).await;

        state.delete(&client, TOKEN, "h1", true).await;

        assert_eq!(state.error.as_deref(), Some("Failed to delete harvest."));
        assert!(state.harvests.iter().any(|h| h.id == "h1"));
    }

    #[test]
    fn store_hands_state_back_per_token() {
        let store = DashboardStore::new();
        let mut state = DashboardState::default();
        state.form.quantity = "3".to_string();

        store.put("t-1", state);
        assert!(store.take("t-2").is_none());

        let cached = store.take("t-1").unwrap();
        assert_eq!(cached.form.quantity, "3");
        // take removes; a second take misses
        assert!(store.take("t-1").is_none());
    }

    #[test]
    fn expired_state_is_never_handed_back() {
        let store = DashboardStore::with_ttl(Duration::ZERO);
        store.put("t-1", DashboardState::default());

        assert!(store.take("t-1").is_none());
    }

    #[test]
    fn inserting_prunes_expired_entries() {
        let store = DashboardStore::with_ttl(Duration::ZERO);
        store.put("t-1", DashboardState::default());
        assert_eq!(store.len(), 1);

        // the abandoned t-1 entry is dropped, not accumulated
        store.put("t-2", DashboardState::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn live_entries_survive_the_insert_sweep() {
        let store = DashboardStore::with_ttl(Duration::from_secs(60));
        store.put("t-1", DashboardState::default());
        store.put("t-2", DashboardState::default());
        assert_eq!(store.len(), 2);

        assert!(store.take("t-1").is_some());
    }
}
