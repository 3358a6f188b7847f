//! Booking listing, details and assignment

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, bold, dimmed, field, format_amount, or_dash, page_footer};
use anyhow::Result;
use spinovo_api_client::endpoints::bookings::AssignBookingRequest;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.bookings().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("Bookings");
    if data.booking_list.is_empty() {
        Status::info("No bookings on this page");
    }
    for booking in &data.booking_list {
        println!(
            "  {:<26} {:<12} {:<16} {:<11} {:>10}  {}",
            dimmed(&booking.id),
            or_dash(&booking.order_display_no),
            or_dash(&booking.service_name),
            or_dash(&booking.booking_date),
            format_amount(booking.order_amount),
            or_dash(&booking.ord_status)
        );
    }
    page_footer(data.page, data.total_pages, data.total_orders, "bookings");
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    let Some(data) = app.render(app.client.bookings().details(id).await?)? else {
        return Ok(());
    };
    let order = data.order.unwrap_or_default();

    Status::header(&format!("Booking {}", or_dash(&order.order_display_no)));
    field("ID", or_dash(&order.id));
    field("Status", or_dash(&order.ord_status));
    field("Service", or_dash(&order.service_name));
    field("Garments", order.garment_qty);
    field("Slot", format!("{} {}", or_dash(&order.booking_date), order.booking_time));
    field("Subtotal", format_amount(order.garment_original_amount));
    field("Discount", format_amount(order.garment_discount_amount));
    field("Charges", format_amount(order.service_charges + order.slot_charges));
    field("Total", bold(format_amount(order.order_amount)));

    if let Some(customer) = data.customer {
        Status::subheader("Customer");
        field("Name", or_dash(&customer.name));
        field("Mobile", or_dash(&customer.mobile));
    }
    if let Some(address) = data.address {
        Status::subheader("Address");
        println!("  {}", or_dash(&address.format_address));
    }
    Ok(())
}

pub async fn assign(app: &App, booking_id: &str, copilot_id: &str) -> Result<()> {
    let request = AssignBookingRequest::new(booking_id, copilot_id);
    let envelope = app.client.bookings().assign(&request).await?;
    app.acknowledge(&envelope, "Booking assigned")?;
    if let (false, Some(data)) = (app.json(), envelope.data()) {
        field("Assignment", &data.assign_id);
    }
    Ok(())
}
