use crate::client::{ClientError, RemoteDataClient};
use crate::domain::Identity;
use tracing::warn;

/// Cookie carrying the backend session token.
pub const SESSION_COOKIE: &str = "pearfect_session";

pub fn token_from_request(request: &actix_web::HttpRequest) -> Option<String> {
    request
        .cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Silent session restoration. Any failure (network, expired token,
/// no session at all) means "not logged in", never an error the user
/// sees.
pub async fn restore(client: &dyn RemoteDataClient, token: &str) -> Option<Identity> {
    match client.resolve_current_identity(token).await {
        Ok(identity) => Some(identity),
        Err(error) => {
            warn!("Session restore failed, treating as logged out: {error}");
            None
        }
    }
}

/// Logs in and re-resolves the current identity with the fresh token,
/// so the stored identity is exactly what the backend reports.
pub async fn login(
    client: &dyn RemoteDataClient,
    email: &str,
    password: &str,
) -> Result<(String, Identity), ClientError> {
    let token = client.login(email, password).await?;
    let identity = client.resolve_current_identity(&token).await?;
    Ok((token, identity))
}

/// Ends the remote session. Best effort: the caller clears the cookie
/// and any cached state regardless of the outcome here.
pub async fn logout(client: &dyn RemoteDataClient, token: &str) {
    if let Err(error) = client.logout(token).await {
        warn!("Remote logout failed: {error}");
    }
}
