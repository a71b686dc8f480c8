use super::NewHarvest;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::str::FromStr;

/// Raw state of the "Log a New Harvest" form, exactly as the browser
/// submits it. Field names match the HTML input names.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct HarvestForm {
    pub pear_variety_id: String,
    pub harvest_date: String,
    pub quantity: String,
    pub quality_rating: String,
    pub notes: String,
}

impl Default for HarvestForm {
    fn default() -> Self {
        Self {
            pear_variety_id: String::new(),
            harvest_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            quantity: String::new(),
            quality_rating: "3".to_string(),
            notes: String::new(),
        }
    }
}

impl HarvestForm {
    /// Checks the form locally and converts it into a create payload.
    /// An `Err` means no remote call may be issued; the message is
    /// shown to the user and the input is kept for correction.
    pub fn validate(&self, owner_id: &str) -> Result<NewHarvest, String> {
        let pear_variety_id = self.pear_variety_id.trim();
        if pear_variety_id.is_empty() || self.quantity.trim().is_empty() {
            return Err("Please select a variety and enter a quantity.".to_string());
        }

        let quantity = BigDecimal::from_str(self.quantity.trim())
            .map_err(|_| "Please enter a valid quantity.".to_string())?;
        if quantity < BigDecimal::from(0) {
            return Err("Quantity cannot be negative.".to_string());
        }
        let quantity = quantity
            .to_f64()
            .ok_or_else(|| "Please enter a valid quantity.".to_string())?;

        let harvest_date = NaiveDate::parse_from_str(self.harvest_date.trim(), "%Y-%m-%d")
            .map_err(|_| "Please enter a valid harvest date.".to_string())?;

        let quality_rating: i32 = self
            .quality_rating
            .trim()
            .parse()
            .map_err(|_| "Quality rating must be between 1 and 5.".to_string())?;
        if !(1..=5).contains(&quality_rating) {
            return Err("Quality rating must be between 1 and 5.".to_string());
        }

        let notes = match self.notes.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(NewHarvest {
            pear_variety_id: pear_variety_id.to_string(),
            owner_id: owner_id.to_string(),
            harvest_date,
            quantity,
            quality_rating,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> HarvestForm {
        HarvestForm {
            pear_variety_id: "v1".to_string(),
            harvest_date: "2024-05-01".to_string(),
            quantity: "12.5".to_string(),
            ..HarvestForm::default()
        }
    }

    #[test]
    fn valid_form_converts_quantity_and_keeps_default_rating() {
        let payload = filled_form().validate("u1").expect("form should be valid");

        assert_eq!(payload.pear_variety_id, "v1");
        assert_eq!(payload.owner_id, "u1");
        assert_eq!(payload.harvest_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(payload.quantity, 12.5);
        assert_eq!(payload.quality_rating, 3);
        assert_eq!(payload.notes, None);
    }

    #[test]
    fn variety_id_is_trimmed_in_the_payload() {
        let form = HarvestForm {
            pear_variety_id: " v1 ".to_string(),
            ..filled_form()
        };
        assert_eq!(form.validate("u1").unwrap().pear_variety_id, "v1");
    }

    #[test]
    fn missing_variety_is_rejected() {
        let form = HarvestForm {
            pear_variety_id: String::new(),
            ..filled_form()
        };
        assert!(form.validate("u1").is_err());
    }

    #[test]
    fn empty_quantity_is_rejected() {
        let form = HarvestForm {
            quantity: "  ".to_string(),
            ..filled_form()
        };
        assert!(form.validate("u1").is_err());
    }

    #[test]
    fn unparseable_quantity_is_rejected() {
        let form = HarvestForm {
            quantity: "a lot".to_string(),
            ..filled_form()
        };
        assert!(form.validate("u1").is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let form = HarvestForm {
            quantity: "-3".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate("u1").unwrap_err(),
            "Quantity cannot be negative."
        );
    }

    #[test]
    fn rating_outside_scale_is_rejected() {
        for rating in ["0", "6", "three"] {
            let form = HarvestForm {
                quality_rating: rating.to_string(),
                ..filled_form()
            };
            assert!(form.validate("u1").is_err(), "rating {rating} accepted");
        }
    }

    #[test]
    fn notes_are_trimmed_to_none_when_blank() {
        let form = HarvestForm {
            notes: "  ".to_string(),
            ..filled_form()
        };
        assert_eq!(form.validate("u1").unwrap().notes, None);

        let form = HarvestForm {
            notes: "windfall after the storm".to_string(),
            ..filled_form()
        };
        assert_eq!(
            form.validate("u1").unwrap().notes.as_deref(),
            Some("windfall after the storm")
        );
    }

    #[test]
    fn default_form_starts_on_today_with_mid_scale_rating() {
        let form = HarvestForm::default();
        assert_eq!(
            form.harvest_date,
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        );
        assert_eq!(form.quality_rating, "3");
        assert!(form.quantity.is_empty());
        assert!(form.pear_variety_id.is_empty());
    }
}
