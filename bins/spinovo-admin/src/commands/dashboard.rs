//! Dashboard overview

use crate::app::App;
use crate::output::{Status, dimmed, field, format_amount, format_count, green, or_dash, red};
use anyhow::Result;

pub async fn run(app: &App) -> Result<()> {
    let Some(data) = app.render(app.client.dashboard().get().await?)? else {
        return Ok(());
    };

    Status::header("Dashboard");
    field("Customers", format_count(data.total_customers));
    field("Bookings", format_count(data.total_booking));
    field("Today", format_count(data.today_total_booking));
    field("Revenue", format_amount(data.total_revenue));
    field("Revenue Δ", growth(data.revenue_growth));
    field("Orders Δ", growth(data.order_growth));

    if !data.monthly_revenue_overview.is_empty() {
        Status::subheader("Monthly revenue");
        for month in &data.monthly_revenue_overview {
            println!("  {:<10} {}", month.month, format_amount(month.value));
        }
    }

    Status::subheader("Today's bookings");
    if data.today_booking_list.is_empty() {
        Status::info("No bookings yet today");
    }
    for booking in &data.today_booking_list {
        println!(
            "  {:<12} {:<16} {:>10}  {}",
            or_dash(&booking.order_display_no),
            or_dash(&booking.service_name),
            format_amount(booking.order_amount),
            dimmed(or_dash(&booking.ord_status))
        );
    }
    Ok(())
}

fn growth(percent: f64) -> String {
    let text = format!("{percent:+.1}%");
    if percent < 0.0 {
        red(text)
    } else {
        green(text)
    }
}
