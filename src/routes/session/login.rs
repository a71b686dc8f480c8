use crate::client::RemoteDataClient;
use crate::configuration::Settings;
use crate::routes::see_other;
use crate::session::{self, SESSION_COOKIE};
use crate::views::LandingHtml;
use actix_web::cookie::Cookie;
use actix_web::{HttpResponse, web};
use askama_actix::TemplateToResponse;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{info, warn};

/// Credentials are optional: the landing page's one-click demo login
/// submits none and falls back to the configured demo account.
#[derive(Deserialize)]
pub struct LoginForm {
    email: Option<String>,
    password: Option<String>,
}

pub async fn login(
    form: web::Form<LoginForm>,
    client: web::Data<dyn RemoteDataClient>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let email = form
        .email
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or(&settings.backend.demo_email);
    let password = form
        .password
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| settings.backend.demo_password.expose_secret());

    match session::login(client.get_ref(), email, password).await {
        Ok((token, user)) => {
            info!("Login succeeded for {}", user.email);
            let cookie = Cookie::build(SESSION_COOKIE, token)
                .path("/")
                .http_only(true)
                .finish();
            let mut response = see_other("/");
            if let Err(error) = response.add_cookie(&cookie) {
                warn!("Failed to attach session cookie: {error}");
            }
            response
        }
        Err(error) => {
            warn!("Login failed: {error}");
            LandingHtml {
                error: Some("Login failed. Please check your credentials."),
                admin_url: settings.application.admin_url.as_str(),
            }
            .to_response()
        }
    }
}
