mod get;

pub use get::home;
