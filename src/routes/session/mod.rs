mod login;
mod logout;

pub use login::login;
pub use logout::logout;
