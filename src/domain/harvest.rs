use super::Variety;
use chrono::NaiveDate;
use serde::Deserialize;

/// A harvest record as the backend returns it.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Harvest {
    pub id: String,
    pub pear_variety_id: String,
    pub owner_id: String,
    pub harvest_date: NaiveDate,

    /// Harvested quantity in kilograms.
    pub quantity: f64,

    /// Ordinal quality score on a 1..=5 scale.
    pub quality_rating: i32,

    #[serde(default)]
    pub notes: Option<String>,

    /// Joined variety, present only when the query asked for the
    /// `pearVariety` relation. Create responses do not carry it.
    #[serde(default)]
    pub pear_variety: Option<Variety>,
}

impl Harvest {
    pub fn variety_name(&self) -> &str {
        self.pear_variety.as_ref().map_or("N/A", |v| v.name.as_str())
    }
}
