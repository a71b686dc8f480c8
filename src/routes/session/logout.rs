use crate::client::RemoteDataClient;
use crate::dashboard::DashboardStore;
use crate::routes::see_other;
use crate::session::{self, SESSION_COOKIE};
use actix_web::cookie::Cookie;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::warn;

/// Ends the session. The cookie and the cached dashboard state are
/// cleared unconditionally, even when the remote logout fails.
pub async fn logout(
    request: HttpRequest,
    client: web::Data<dyn RemoteDataClient>,
    store: web::Data<DashboardStore>,
) -> HttpResponse {
    if let Some(token) = session::token_from_request(&request) {
        session::logout(client.get_ref(), &token).await;
        store.remove(&token);
    }

    let mut response = see_other("/");
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    if let Err(error) = response.add_removal_cookie(&cookie) {
        warn!("Failed to clear session cookie: {error}");
    }
    response
}
