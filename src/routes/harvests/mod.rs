mod create;
mod delete;

pub use create::create_harvest;
pub use delete::delete_harvest;
