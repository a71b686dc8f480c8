mod harvests;
mod home;
mod session;

pub use harvests::{create_harvest, delete_harvest};
pub use home::home;
pub use session::{login, logout};

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
