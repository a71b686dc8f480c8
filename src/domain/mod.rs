mod harvest;
mod harvest_form;
mod identity;
mod new_harvest;
mod variety;

pub use harvest::Harvest;
pub use harvest_form::HarvestForm;
pub use identity::Identity;
pub use new_harvest::NewHarvest;
pub use variety::Variety;
