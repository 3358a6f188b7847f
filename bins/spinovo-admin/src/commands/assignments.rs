//! Booking assignments

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, dimmed, or_dash, page_footer};
use anyhow::Result;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.assignments().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("Assignments");
    if data.assign_list.is_empty() {
        Status::info("No assignments on this page");
    }
    for assignment in &data.assign_list {
        let order = assignment
            .order_details
            .as_ref()
            .map_or_else(|| assignment.booking_id.clone(), |o| o.order_display_no.clone());
        let copilot = assignment
            .copilot_details
            .as_ref()
            .map_or_else(|| assignment.copilot_id.clone(), |c| c.name.clone());
        println!(
            "  {:<26} {:<12} → {:<24} {}",
            dimmed(&assignment.id),
            or_dash(&order),
            or_dash(&copilot),
            dimmed(or_dash(&assignment.created_at))
        );
    }
    page_footer(data.current_page, data.total_pages, data.total_count, "assignments");
    Ok(())
}
