use crate::client::RemoteDataClient;
use crate::configuration::Settings;
use crate::dashboard::{DashboardState, DashboardStore};
use crate::domain::HarvestForm;
use crate::routes::see_other;
use crate::session;
use crate::views::DashboardHtml;
use actix_web::{HttpRequest, HttpResponse, web};
use askama_actix::TemplateToResponse;

pub async fn create_harvest(
    request: HttpRequest,
    form: web::Form<HarvestForm>,
    client: web::Data<dyn RemoteDataClient>,
    store: web::Data<DashboardStore>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let Some(token) = session::token_from_request(&request) else {
        return see_other("/");
    };
    let Some(user) = session::restore(client.get_ref(), &token).await else {
        store.remove(&token);
        return see_other("/");
    };

    // Dropped cache (restart, expired entry) falls back to a fresh load.
    let mut state = match store.take(&token) {
        Some(state) => state,
        None => DashboardState::load(client.get_ref(), &token, &user.id).await,
    };

    state.form = form.into_inner();
    state.submit(client.get_ref(), &token, &user.id).await;

    let response = DashboardHtml {
        user: &user,
        dashboard: &state,
        admin_url: settings.application.admin_url.as_str(),
    }
    .to_response();
    store.put(&token, state);
    response
}
