//! Wallet transactions

use crate::PageArgs;
use crate::app::App;
use crate::output::{Status, dimmed, format_amount, green, or_dash, page_footer, red};
use anyhow::Result;

pub async fn list(app: &App, page: PageArgs) -> Result<()> {
    let envelope = app.client.transactions().list(page.page, page.limit).await?;
    let Some(data) = app.render(envelope)? else {
        return Ok(());
    };

    Status::header("Transactions");
    if data.transaction_list.is_empty() {
        Status::info("No transactions on this page");
    }
    for tx in &data.transaction_list {
        let amount = format_amount(tx.amount);
        let amount = if tx.transaction_type.eq_ignore_ascii_case("debit") {
            red(amount)
        } else {
            green(amount)
        };
        println!(
            "  {:<20} {:<8} {:>12}  {:<20} {}",
            or_dash(&tx.transaction_id),
            or_dash(&tx.transaction_type),
            amount,
            or_dash(&tx.reason),
            dimmed(or_dash(&tx.created_at))
        );
    }
    page_footer(data.page, data.total_pages, data.total_transaction, "transactions");
    Ok(())
}
