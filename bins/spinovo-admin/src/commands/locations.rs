//! Service area management

use crate::app::App;
use crate::output::{Status, bold, dimmed, format_amount, green, or_dash};
use anyhow::Result;
use spinovo_api_client::endpoints::locations::{AreaRequest, CityRequest, StateRequest};

/// City fields gathered from the command line
pub struct CityArgs {
    pub name: String,
    pub id: String,
    pub handling_charge: f64,
    pub platform_charge: f64,
    pub active: bool,
}

/// Area fields gathered from the command line
pub struct AreaArgs {
    pub name: String,
    pub id: String,
    pub pincode: String,
    pub active: bool,
}

pub async fn states(app: &App) -> Result<()> {
    let Some(data) = app.render(app.client.locations().states().await?)? else {
        return Ok(());
    };

    Status::header("Service areas");
    if data.data.is_empty() {
        Status::info("No states configured");
    }
    for state in &data.data {
        println!(
            "{} {} {}",
            marker(state.status),
            bold(or_dash(&state.state_name)),
            dimmed(format!("[{}]", state.state_id))
        );
        for city in &state.cities {
            println!(
                "  {} {} {}  handling {} · platform {}",
                marker(city.status),
                or_dash(&city.city_name),
                dimmed(format!("[{}]", city.city_id)),
                format_amount(city.handling_charge),
                format_amount(city.platform_charge)
            );
            for area in &city.pincodes {
                println!(
                    "    {} {} {} {}",
                    marker(area.status),
                    or_dash(&area.area_name),
                    dimmed(format!("[{}]", area.area_id)),
                    area.pincode
                );
            }
        }
    }
    Ok(())
}

pub async fn create_state(app: &App, name: &str, id: &str, active: bool) -> Result<()> {
    let request = StateRequest {
        state_name: name.to_string(),
        state_id: id.to_string(),
        status: active,
    };
    let envelope = app.client.locations().create_state(&request).await?;
    app.acknowledge(&envelope, "State saved")
}

pub async fn delete_state(app: &App, state_id: &str) -> Result<()> {
    let envelope = app.client.locations().delete_state(state_id).await?;
    app.acknowledge(&envelope, "State deleted")
}

pub async fn create_city(app: &App, state_id: &str, city: CityArgs) -> Result<()> {
    let request = CityRequest {
        city_name: city.name,
        city_id: city.id,
        handling_charge: city.handling_charge,
        platform_charge: city.platform_charge,
        status: city.active,
    };
    let envelope = app.client.locations().create_city(state_id, &request).await?;
    app.acknowledge(&envelope, "City saved")
}

pub async fn delete_city(app: &App, state_id: &str, city_id: &str) -> Result<()> {
    let envelope = app.client.locations().delete_city(state_id, city_id).await?;
    app.acknowledge(&envelope, "City deleted")
}

pub async fn create_area(app: &App, state_id: &str, city_id: &str, area: AreaArgs) -> Result<()> {
    let request = AreaRequest {
        area_name: area.name,
        area_id: area.id,
        pincode: area.pincode,
        status: area.active,
    };
    let envelope = app
        .client
        .locations()
        .create_area(state_id, city_id, &request)
        .await?;
    app.acknowledge(&envelope, "Area saved")
}

pub async fn delete_area(app: &App, state_id: &str, city_id: &str, area_id: &str) -> Result<()> {
    let envelope = app
        .client
        .locations()
        .delete_area(state_id, city_id, area_id)
        .await?;
    app.acknowledge(&envelope, "Area deleted")
}

fn marker(active: bool) -> String {
    if active {
        green("●")
    } else {
        dimmed("○")
    }
}
