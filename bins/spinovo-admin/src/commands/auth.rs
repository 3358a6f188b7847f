//! Sign-in, sign-out and session inspection

use crate::app::App;
use crate::output::{Status, field, green, or_dash, print_json, red, yellow};
use anyhow::Result;
use serde_json::json;
use spinovo_api_client::SessionState;
use spinovo_core::AppError;

pub async fn login(app: &App, mobile: &str, password: &str) -> Result<()> {
    let envelope = app.client.auth().login(mobile, password).await?;
    if app.json() {
        print_json(&envelope)?;
    }

    // A rejected login comes back as a successful envelope with `status: false`
    let session = app.client.session();
    if !envelope.status || !session.is_authenticated() {
        let message = if envelope.msg.is_empty() {
            "Login failed".to_string()
        } else {
            envelope.msg
        };
        return Err(AppError::authentication(message).into());
    }
    if app.json() {
        return Ok(());
    }

    let user = session.user().unwrap_or_default();
    Status::success(&format!("Signed in as {}", or_dash(&user.name)));
    if let Some(expires) = session.expires_at() {
        field("Expires", expires.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.client.session().logout();
    if app.json() {
        return print_json(&json!({ "state": SessionState::Unauthenticated }));
    }
    Status::success("Signed out");
    Ok(())
}

/// Local view of the stored session; never touches the network
pub fn status(app: &App) -> Result<()> {
    let session = app.client.session();
    let state = session.inspect();
    let user = session.user();
    let expires_at = session.expires_at();
    let config = app.client.config();

    if app.json() {
        return print_json(&json!({
            "state": state,
            "user": user.as_ref().map(|u| json!({ "id": u.id, "name": u.name, "mobile": u.mobile })),
            "expires_at": expires_at,
            "base_url": app.client.base_url(),
            "app": format!("{} {}", config.app_name, config.app_version),
            "environment": config.environment,
        }));
    }

    Status::header("Session");
    let label = match state {
        SessionState::Authenticated => green("✓ Signed in"),
        SessionState::Expired => yellow("⚠ Expired"),
        SessionState::Unauthenticated => red("✗ Not signed in"),
    };
    field("State", label);
    if let Some(user) = user {
        field("Name", or_dash(&user.name));
        field("Mobile", or_dash(&user.mobile));
    }
    if let Some(expires) = expires_at {
        field("Expires", expires.format("%Y-%m-%d %H:%M UTC"));
    }
    field("Backend", app.client.base_url());
    field("Environment", config.environment);
    field("App", format!("{} {}", config.app_name, config.app_version));
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    let Some(data) = app.render(app.client.auth().profile().await?)? else {
        return Ok(());
    };
    let profile = data.profile.unwrap_or_default();

    Status::header("Profile");
    field("ID", or_dash(&profile.id));
    field("Name", or_dash(&profile.name));
    field("Mobile", or_dash(&profile.mobile));
    field("Email", or_dash(&profile.email));
    field("Role", profile.admin_role);
    field("City", profile.city_id);
    Ok(())
}
