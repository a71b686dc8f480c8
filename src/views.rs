//! Screen markup as a pure function of state. No logic lives here
//! beyond what the templates need to lay things out.

use crate::dashboard::DashboardState;
use crate::domain::Identity;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingHtml<'a> {
    pub error: Option<&'a str>,
    pub admin_url: &'a str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardHtml<'a> {
    pub user: &'a Identity,
    pub dashboard: &'a DashboardState,
    pub admin_url: &'a str,
}
