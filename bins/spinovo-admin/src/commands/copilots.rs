//! Co-pilot management

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, dimmed, field, or_dash, page_footer};
use anyhow::Result;
use spinovo_api_client::endpoints::copilots::CreateCopilotRequest;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.copilots().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("Co-pilots");
    if data.copilot_list.is_empty() {
        Status::info("No co-pilots on this page");
    }
    for copilot in &data.copilot_list {
        println!(
            "  {:<26} {:<24} {:<12}",
            dimmed(&copilot.id),
            or_dash(&copilot.name),
            or_dash(&copilot.mobile)
        );
    }
    page_footer(data.page, data.total_pages, data.copilot_total, "co-pilots");
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    let Some(data) = app.render(app.client.copilots().details(id).await?)? else {
        return Ok(());
    };
    let copilot = data.copilot_user.unwrap_or_default();

    Status::header(&format!("Co-pilot {}", or_dash(&copilot.name)));
    field("ID", or_dash(&copilot.id));
    field("Mobile", or_dash(&copilot.mobile));
    field("Email", or_dash(&copilot.email));
    field("City", copilot.city_id);
    field("Status", copilot.status);
    field("Joined", or_dash(&copilot.created_at));
    Ok(())
}

pub async fn create(app: &App, name: &str, mobile: &str, password: &str) -> Result<()> {
    let request = CreateCopilotRequest {
        name: name.to_string(),
        mobile: mobile.to_string(),
        password: password.to_string(),
    };
    let envelope = app.client.copilots().create(&request).await?;
    app.acknowledge(&envelope, "Co-pilot created")?;
    if let (false, Some(user)) = (app.json(), envelope.data().and_then(|d| d.user.as_ref())) {
        field("ID", &user.id);
    }
    Ok(())
}
