use crate::client::RemoteDataClient;
use crate::configuration::Settings;
use crate::dashboard::{DashboardState, DashboardStore};
use crate::session;
use crate::views::{DashboardHtml, LandingHtml};
use actix_web::{HttpRequest, HttpResponse, web};
use askama_actix::TemplateToResponse;

/// Landing or dashboard, decided by silent session restoration.
pub async fn home(
    request: HttpRequest,
    client: web::Data<dyn RemoteDataClient>,
    store: web::Data<DashboardStore>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let admin_url = settings.application.admin_url.as_str();

    let Some(token) = session::token_from_request(&request) else {
        return LandingHtml {
            error: None,
            admin_url,
        }
        .to_response();
    };

    match session::restore(client.get_ref(), &token).await {
        // Stale or invalid cookie: plain logged-out landing, no error.
        // Whatever the token had cached is dead state now.
        None => {
            store.remove(&token);
            LandingHtml {
                error: None,
                admin_url,
            }
            .to_response()
        }
        Some(user) => {
            let state = DashboardState::load(client.get_ref(), &token, &user.id).await;
            let response = DashboardHtml {
                user: &user,
                dashboard: &state,
                admin_url,
            }
            .to_response();
            store.put(&token, state);
            response
        }
    }
}
