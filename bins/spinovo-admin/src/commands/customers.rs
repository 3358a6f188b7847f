//! Customer listing and details

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, dimmed, field, format_amount, green, or_dash, page_footer};
use anyhow::Result;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.customers().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("Customers");
    if data.customer_list.is_empty() {
        Status::info("No customers on this page");
    }
    for customer in &data.customer_list {
        let active = if customer.is_active { green("●") } else { dimmed("○") };
        println!(
            "  {} {:<26} {:<24} {:<12} {:>10}",
            active,
            dimmed(&customer.id),
            or_dash(&customer.name),
            or_dash(&customer.mobile),
            format_amount(customer.wallet_balance)
        );
    }
    page_footer(data.page, data.total_pages, data.total_customers, "customers");
    Ok(())
}

pub async fn show(app: &App, id: &str) -> Result<()> {
    let Some(data) = app.render(app.client.customers().details(id).await?)? else {
        return Ok(());
    };
    let customer = data.user.unwrap_or_default();

    Status::header(&format!("Customer {}", or_dash(&customer.name)));
    field("ID", or_dash(&customer.id));
    field("Mobile", or_dash(&customer.mobile));
    field("Email", or_dash(&customer.email));
    field("Wallet", format_amount(customer.wallet_balance));
    field("Bonus", format_amount(customer.spinovo_bonus));
    field("Last active", or_dash(&customer.last_active));
    field("Joined", or_dash(&customer.created_at));

    Status::subheader(&format!("Addresses ({})", data.addresses.len()));
    for address in &data.addresses {
        let primary = if address.is_primary { green(" (primary)") } else { String::new() };
        println!("  {}{}", or_dash(&address.format_address), primary);
    }

    Status::subheader(&format!("Orders ({})", data.orders.len()));
    for order in &data.orders {
        println!(
            "  {:<12} {:<16} {:>10}  {}",
            or_dash(&order.order_display_no),
            or_dash(&order.service_name),
            format_amount(order.order_amount),
            dimmed(or_dash(&order.ord_status))
        );
    }

    Status::subheader(&format!("Transactions ({})", data.transactions.len()));
    for tx in &data.transactions {
        println!(
            "  {:<8} {:>10}  {}",
            or_dash(&tx.transaction_type),
            format_amount(tx.amount),
            dimmed(or_dash(&tx.reason))
        );
    }
    Ok(())
}
