//! OTP request log

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, dimmed, or_dash, page_footer};
use anyhow::Result;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.otp().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("OTP requests");
    if data.otp_list.is_empty() {
        Status::info("No OTP requests on this page");
    }
    for otp in &data.otp_list {
        println!(
            "  {:<12} {:<8} {}",
            or_dash(&otp.mobile_no),
            or_dash(&otp.otp_code),
            dimmed(or_dash(&otp.created_at))
        );
    }
    page_footer(data.page, data.total_pages, data.total_otp_request, "requests");
    Ok(())
}
