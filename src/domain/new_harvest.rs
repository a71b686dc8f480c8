use chrono::NaiveDate;
use serde::Serialize;

/// Validated payload for creating a harvest record.
///
/// Built through [`HarvestForm::validate`], so a value of this type
/// always references a variety and carries a non-negative quantity and
/// a rating on the 1..=5 scale.
///
/// [`HarvestForm::validate`]: super::HarvestForm::validate
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewHarvest {
    pub pear_variety_id: String,
    pub owner_id: String,
    pub harvest_date: NaiveDate,

    /// Submitted as a JSON number; the backend stores it as a decimal.
    pub quantity: f64,
    pub quality_rating: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
