use crate::client::RemoteDataClient;
use crate::configuration::Settings;
use crate::dashboard::{DashboardState, DashboardStore};
use crate::routes::see_other;
use crate::session;
use crate::views::DashboardHtml;
use actix_web::{HttpRequest, HttpResponse, web};
use askama_actix::TemplateToResponse;
use serde::Deserialize;

/// The checkbox is only submitted when ticked; an absent field means
/// the user did not confirm and no remote call may happen.
#[derive(Deserialize)]
pub struct DeleteForm {
    confirm: Option<String>,
}

pub async fn delete_harvest(
    request: HttpRequest,
    path: web::Path<(String,)>,
    form: web::Form<DeleteForm>,
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

    let harvest_id = path.into_inner().0;
    let confirmed = form.confirm.as_deref() == Some("on");

    let mut state = match store.take(&token) {
        Some(state) => state,
        None => DashboardState::load(client.get_ref(), &token, &user.id).await,
    };

    state.delete(client.get_ref(), &token, &harvest_id, confirmed).await;

    let response = DashboardHtml {
        user: &user,
        dashboard: &state,
        admin_url: settings.application.admin_url.as_str(),
    }
    .to_response();
    store.put(&token, state);
    response
}
