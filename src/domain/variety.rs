use serde::Deserialize;

/// Reference catalog entry describing a pear cultivar.
/// Read-only for this client; never mutated.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Variety {
    pub id: String,
    pub name: String,

    /// Short flavor description (example: `"sweet and juicy"`)
    pub flavor_profile: String,
    pub origin: String,
    pub description: String,

    #[serde(default)]
    pub image_url: Option<String>,
}
