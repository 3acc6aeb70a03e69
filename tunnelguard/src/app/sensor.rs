// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sensors installed in tunnels
//!
//! Plain entity CRUD.  Sensor readings feed the dashboards; nothing in the
//! closure workflow depends on them.

use crate::context::OpContext;
use crate::db::model;
use crate::db::model::Sensor;
use tunnelguard_api::params;
use tunnelguard_common::api::external::{
    CreateResult, ListResultVec, UpdateResult,
};

impl super::TunnelGuard {
    pub async fn sensors_list_for_tunnel(
        &self,
        _opctx: &OpContext,
        tunnel_id: &str,
    ) -> ListResultVec<Sensor> {
        self.datastore.sensors_list_for_tunnel(tunnel_id).await
    }

    pub async fn sensor_create(
        &self,
        _opctx: &OpContext,
        params: &params::SensorCreate,
    ) -> CreateResult<Sensor> {
        self.datastore
            .sensor_create(model::SensorCreate::from(params.clone()))
            .await
    }

    pub async fn sensor_update(
        &self,
        _opctx: &OpContext,
        sensor_id: i64,
        params: &params::SensorUpdate,
    ) -> UpdateResult<Sensor> {
        // 404 before merge, like the other update paths
        self.datastore.sensor_fetch(sensor_id).await?;
        self.datastore
            .sensor_update(sensor_id, model::SensorUpdate::from(params.clone()))
            .await
    }
}
