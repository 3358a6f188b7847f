//! Service area endpoints
//!
//! Locations form a three-level tree: state, city, area (pincode).
//! Creates and updates share one POST per level; the backend upserts on
//! the id carried in the body.

use crate::client::SpinovoClient;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use spinovo_core::validation::{Validator, require_id};

/// Locations API interface
#[derive(Debug, Clone)]
pub struct LocationsApi {
    client: SpinovoClient,
}

impl LocationsApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/states
    pub async fn states(&self) -> ApiResult<ApiEnvelope<LocationListData>> {
        self.client.get("/admin/states").await
    }

    /// POST /admin/state
    pub async fn create_state(&self, request: &StateRequest) -> ApiResult<ApiEnvelope<Value>> {
        request.validate()?;
        self.client.post("/admin/state", request).await
    }

    /// POST /admin/state
    pub async fn update_state(
        &self,
        state_id: &str,
        request: &StateRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        request.validate()?;
        self.client.post("/admin/state", request).await
    }

    /// DELETE /admin/state/{id}
    pub async fn delete_state(&self, state_id: &str) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        self.client.delete(&format!("/admin/state/{}", state_id.trim())).await
    }

    /// POST /admin/state/{id}/city
    pub async fn create_city(
        &self,
        state_id: &str,
        request: &CityRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        request.validate()?;
        self.client
            .post(&format!("/admin/state/{}/city", state_id.trim()), request)
            .await
    }

    /// POST /admin/state/{id}/city
    pub async fn update_city(
        &self,
        state_id: &str,
        request: &CityRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        self.create_city(state_id, request).await
    }

    /// DELETE /admin/state/{id}/city/{cid}
    pub async fn delete_city(&self, state_id: &str, city_id: &str) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        require_id("city", city_id)?;
        self.client
            .delete(&format!("/admin/state/{}/city/{}", state_id.trim(), city_id.trim()))
            .await
    }

    /// POST /admin/state/{id}/city/{cid}/area
    pub async fn create_area(
        &self,
        state_id: &str,
        city_id: &str,
        request: &AreaRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        require_id("city", city_id)?;
        request.validate()?;
        self.client
            .post(
                &format!("/admin/state/{}/city/{}/area", state_id.trim(), city_id.trim()),
                request,
            )
            .await
    }

    /// POST /admin/state/{id}/city/{cid}/area
    pub async fn update_area(
        &self,
        state_id: &str,
        city_id: &str,
        request: &AreaRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        self.create_area(state_id, city_id, request).await
    }

    /// DELETE /admin/state/{id}/city/{cid}/area/{aid}
    pub async fn delete_area(
        &self,
        state_id: &str,
        city_id: &str,
        area_id: &str,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("state", state_id)?;
        require_id("city", city_id)?;
        require_id("area", area_id)?;
        self.client
            .delete(&format!(
                "/admin/state/{}/city/{}/area/{}",
                state_id.trim(),
                city_id.trim(),
                area_id.trim()
            ))
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Area {
    #[serde(rename = "_id")]
    pub id: String,
    pub area_name: String,
    pub area_id: String,
    pub pincode: String,
    pub status: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct City {
    #[serde(rename = "_id")]
    pub id: String,
    pub city_name: String,
    pub city_id: String,
    pub handling_charge: f64,
    pub platform_charge: f64,
    pub status: bool,
    pub pincodes: Vec<Area>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct State {
    #[serde(rename = "_id")]
    pub id: String,
    pub state_name: String,
    pub state_id: String,
    pub status: bool,
    pub cities: Vec<City>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationListData {
    pub data: Vec<State>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRequest {
    pub state_name: String,
    pub state_id: String,
    pub status: bool,
}

impl StateRequest {
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("stateName", &self.state_name)
            .min_length("stateName", self.state_name.trim(), 2)
            .required("stateId", &self.state_id)
            .min_length("stateId", self.state_id.trim(), 2)
            .max_length("stateId", self.state_id.trim(), 5)
            .validate()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRequest {
    pub city_name: String,
    pub city_id: String,
    pub handling_charge: f64,
    pub platform_charge: f64,
    pub status: bool,
}

impl CityRequest {
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("cityName", &self.city_name)
            .min_length("cityName", self.city_name.trim(), 2)
            .required("cityId", &self.city_id)
            .min_length("cityId", self.city_id.trim(), 2)
            .max_length("cityId", self.city_id.trim(), 5)
            .non_negative("handlingCharge", self.handling_charge)
            .non_negative("platformCharge", self.platform_charge)
            .validate()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaRequest {
    pub area_name: String,
    pub area_id: String,
    pub pincode: String,
    pub status: bool,
}

impl AreaRequest {
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("areaName", &self.area_name)
            .min_length("areaName", self.area_name.trim(), 2)
            .required("areaId", &self.area_id)
            .min_length("areaId", self.area_id.trim(), 2)
            .max_length("areaId", self.area_id.trim(), 5)
            .min_length("pincode", self.pincode.trim(), 6)
            .max_length("pincode", self.pincode.trim(), 6)
            .validate()
    }
}
