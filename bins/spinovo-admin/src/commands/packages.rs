//! Subscription packages

use crate::app::App;
use crate::output::{Status, bold, cyan, dimmed, format_amount, or_dash};
use anyhow::Result;
use spinovo_api_client::endpoints::packages::SubPlanRequest;

pub async fn list(app: &App) -> Result<()> {
    let Some(data) = app.render(app.client.packages().list().await?)? else {
        return Ok(());
    };

    Status::header(&format!("Packages ({})", data.count));
    for package in &data.data {
        println!("{} {}", bold(or_dash(&package.name)), dimmed(&package.id));
        for plan in &package.plan {
            println!(
                "  {} {} days {}",
                cyan(format!("#{}", plan.plan_id)),
                plan.validity,
                dimmed(&plan.id)
            );
            for sub in &plan.sub_plan {
                let sub_id = match &sub.sub_plan_id {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                println!(
                    "    {:<4} {:>3} clothes  {:>10}  {:>4}% off  {} pickups",
                    sub_id,
                    sub.clothes,
                    format_amount(sub.prices),
                    sub.discount_rate,
                    sub.no_of_pickups
                );
            }
        }
    }
    Ok(())
}

pub async fn create(app: &App, name: &str) -> Result<()> {
    let envelope = app.client.packages().create(name).await?;
    app.acknowledge(&envelope, "Package created")
}

pub async fn delete(app: &App, package_id: &str) -> Result<()> {
    let envelope = app.client.packages().delete(package_id).await?;
    app.acknowledge(&envelope, "Package deleted")
}

pub async fn add_validity(app: &App, package_id: &str, plan_id: u32, validity: u32) -> Result<()> {
    let envelope = app
        .client
        .packages()
        .create_validity_plan(package_id, plan_id, validity)
        .await?;
    app.acknowledge(&envelope, "Validity plan added")
}

pub async fn add_sub_plan(
    app: &App,
    package_id: &str,
    plan_id: &str,
    sub_plan: &SubPlanRequest,
) -> Result<()> {
    let envelope = app
        .client
        .packages()
        .create_sub_plan(package_id, plan_id, sub_plan)
        .await?;
    app.acknowledge(&envelope, "Sub plan added")
}

pub async fn delete_validity(app: &App, package_id: &str, plan_id: &str) -> Result<()> {
    let envelope = app
        .client
        .packages()
        .delete_validity_plan(package_id, plan_id)
        .await?;
    app.acknowledge(&envelope, "Validity plan deleted")
}

pub async fn delete_sub_plan(
    app: &App,
    package_id: &str,
    plan_id: &str,
    sub_plan_id: &str,
) -> Result<()> {
    let envelope = app
        .client
        .packages()
        .delete_sub_plan(package_id, plan_id, sub_plan_id)
        .await?;
    app.acknowledge(&envelope, "Sub plan deleted")
}
