// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory data store for TunnelGuard records
//!
//! All collections live inside [`DataStoreInner`] behind a single mutex.
//! Each method acquires the lock, commits its change, and releases; there is
//! no cross-method transaction, so multi-step workflows built on top of this
//! store get best-effort sequential side effects only.
//!
//! Numeric ids count up from 1 per entity type and are never reused, even
//! after a delete.  Tunnels use caller-supplied string codes instead.

use super::model::{
    ClosureRequest, ClosureRequestCreate, OperationsLog, OperationsLogCreate,
    OperationsLogFilter, Sensor, SensorCreate, SensorUpdate, Tunnel,
    TunnelCreate, TunnelUpdate, User, UserCreate, UserUpdate,
};
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;
use tunnelguard_common::api::external::{
    ClosureRequestStatus, CreateResult, DeleteResult, Error, ListResultVec,
    LookupResult, ResourceType, UpdateResult, UserStatus,
};

pub struct DataStore {
    inner: Mutex<DataStoreInner>,
}

struct DataStoreInner {
    users: BTreeMap<i64, User>,
    tunnels: BTreeMap<String, Tunnel>,
    sensors: BTreeMap<i64, Sensor>,
    closure_requests: BTreeMap<i64, ClosureRequest>,
    operations_logs: BTreeMap<i64, OperationsLog>,
    next_user_id: i64,
    next_sensor_id: i64,
    next_closure_request_id: i64,
    next_operations_log_id: i64,
}

impl DataStoreInner {
    fn new() -> DataStoreInner {
        DataStoreInner {
            users: BTreeMap::new(),
            tunnels: BTreeMap::new(),
            sensors: BTreeMap::new(),
            closure_requests: BTreeMap::new(),
            operations_logs: BTreeMap::new(),
            next_user_id: 1,
            next_sensor_id: 1,
            next_closure_request_id: 1,
            next_operations_log_id: 1,
        }
    }
}

impl DataStore {
    pub fn new() -> DataStore {
        DataStore { inner: Mutex::new(DataStoreInner::new()) }
    }

    // Users

    pub async fn user_create(&self, new_user: UserCreate) -> CreateResult<User> {
        let mut inner = self.inner.lock().await;
        if inner.users.values().any(|user| user.email == new_user.email) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::User,
                object_name: new_user.email,
            });
        }
        let id = inner.next_user_id;
        inner.next_user_id += 1;
        let user = User {
            id,
            username: new_user.username,
            full_name: new_user.full_name,
            email: new_user.email,
            phone: new_user.phone,
            password: new_user.password,
            role: new_user.role,
            status: UserStatus::Active,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    pub async fn user_fetch(&self, user_id: i64) -> LookupResult<User> {
        let inner = self.inner.lock().await;
        inner
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::not_found_by_id(ResourceType::User, user_id))
    }

    /// Point lookup by email, used by the login path
    ///
    /// Returns `None` rather than a not-found error so the caller can fold
    /// "no such account" and "wrong password" into one response.
    pub async fn user_fetch_by_email(&self, email: &str) -> Option<User> {
        let inner = self.inner.lock().await;
        inner.users.values().find(|user| user.email == email).cloned()
    }

    pub async fn user_update(
        &self,
        user_id: i64,
        update: UserUpdate,
    ) -> UpdateResult<User> {
        let mut inner = self.inner.lock().await;
        let user = inner.users.get_mut(&user_id).ok_or_else(|| {
            Error::not_found_by_id(ResourceType::User, user_id)
        })?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(phone) = update.phone {
            user.phone = phone;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        Ok(user.clone())
    }

    pub async fn user_delete(&self, user_id: i64) -> DeleteResult {
        let mut inner = self.inner.lock().await;
        inner
            .users
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found_by_id(ResourceType::User, user_id))
    }

    pub async fn users_list(&self) -> ListResultVec<User> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().cloned().collect())
    }

    // Tunnels

    pub async fn tunnel_create(
        &self,
        new_tunnel: TunnelCreate,
    ) -> CreateResult<Tunnel> {
        let mut inner = self.inner.lock().await;
        if inner.tunnels.contains_key(&new_tunnel.id) {
            return Err(Error::ObjectAlreadyExists {
                type_name: ResourceType::Tunnel,
                object_name: new_tunnel.id,
            });
        }
        let tunnel = Tunnel {
            id: new_tunnel.id.clone(),
            name: new_tunnel.name,
            risk_level: new_tunnel.risk_level,
            water_level: new_tunnel.water_level,
            barrier_status: new_tunnel.barrier_status,
            last_update: Utc::now(),
            guidance_display_enabled: new_tunnel.guidance_display_enabled,
            active_guidance_symbol: new_tunnel.active_guidance_symbol,
        };
        inner.tunnels.insert(new_tunnel.id, tunnel.clone());
        Ok(tunnel)
    }

    pub async fn tunnel_fetch(&self, tunnel_id: &str) -> LookupResult<Tunnel> {
        let inner = self.inner.lock().await;
        inner.tunnels.get(tunnel_id).cloned().ok_or_else(|| {
            Error::not_found_by_code(ResourceType::Tunnel, tunnel_id)
        })
    }

    pub async fn tunnel_update(
        &self,
        tunnel_id: &str,
        update: TunnelUpdate,
    ) -> UpdateResult<Tunnel> {
        let mut inner = self.inner.lock().await;
        let tunnel = inner.tunnels.get_mut(tunnel_id).ok_or_else(|| {
            Error::not_found_by_code(ResourceType::Tunnel, tunnel_id)
        })?;
        if let Some(name) = update.name {
            tunnel.name = name;
        }
        if let Some(risk_level) = update.risk_level {
            tunnel.risk_level = risk_level;
        }
        if let Some(water_level) = update.water_level {
            tunnel.water_level = water_level;
        }
        if let Some(barrier_status) = update.barrier_status {
            tunnel.barrier_status = barrier_status;
        }
        if let Some(enabled) = update.guidance_display_enabled {
            tunnel.guidance_display_enabled = enabled;
        }
        if let Some(symbol) = update.active_guidance_symbol {
            tunnel.active_guidance_symbol = symbol;
        }
        tunnel.last_update = Utc::now();
        Ok(tunnel.clone())
    }

    pub async fn tunnel_delete(&self, tunnel_id: &str) -> DeleteResult {
        let mut inner = self.inner.lock().await;
        inner.tunnels.remove(tunnel_id).map(|_| ()).ok_or_else(|| {
            Error::not_found_by_code(ResourceType::Tunnel, tunnel_id)
        })
    }

    pub async fn tunnels_list(&self) -> ListResultVec<Tunnel> {
        let inner = self.inner.lock().await;
        Ok(inner.tunnels.values().cloned().collect())
    }

    // Sensors

    pub async fn sensor_create(
        &self,
        new_sensor: SensorCreate,
    ) -> CreateResult<Sensor> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_sensor_id;
        inner.next_sensor_id += 1;
        let sensor = Sensor {
            id,
            tunnel_id: new_sensor.tunnel_id,
            kind: new_sensor.kind,
            value: new_sensor.value,
            unit: new_sensor.unit,
            status: new_sensor.status,
            last_calibrated: new_sensor.last_calibrated.unwrap_or_else(Utc::now),
            next_maintenance: new_sensor.next_maintenance,
        };
        inner.sensors.insert(id, sensor.clone());
        Ok(sensor)
    }

    pub async fn sensor_fetch(&self, sensor_id: i64) -> LookupResult<Sensor> {
        let inner = self.inner.lock().await;
        inner.sensors.get(&sensor_id).cloned().ok_or_else(|| {
            Error::not_found_by_id(ResourceType::Sensor, sensor_id)
        })
    }

    pub async fn sensor_update(
        &self,
        sensor_id: i64,
        update: SensorUpdate,
    ) -> UpdateResult<Sensor> {
        let mut inner = self.inner.lock().await;
        let sensor = inner.sensors.get_mut(&sensor_id).ok_or_else(|| {
            Error::not_found_by_id(ResourceType::Sensor, sensor_id)
        })?;
        if let Some(kind) = update.kind {
            sensor.kind = kind;
        }
        if let Some(value) = update.value {
            sensor.value = value;
        }
        if let Some(unit) = update.unit {
            sensor.unit = unit;
        }
        if let Some(status) = update.status {
            sensor.status = status;
        }
        if let Some(last_calibrated) = update.last_calibrated {
            sensor.last_calibrated = last_calibrated;
        }
        if let Some(next_maintenance) = update.next_maintenance {
            sensor.next_maintenance = next_maintenance;
        }
        Ok(sensor.clone())
    }

    pub async fn sensors_list_for_tunnel(
        &self,
        tunnel_id: &str,
    ) -> ListResultVec<Sensor> {
        let inner = self.inner.lock().await;
        Ok(inner
            .sensors
            .values()
            .filter(|sensor| sensor.tunnel_id == tunnel_id)
            .cloned()
            .collect())
    }

    // Closure requests

    pub async fn closure_request_create(
        &self,
        new_request: ClosureRequestCreate,
    ) -> CreateResult<ClosureRequest> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_closure_request_id;
        inner.next_closure_request_id += 1;
        let now = Utc::now();
        let request = ClosureRequest {
            id,
            tunnel_id: new_request.tunnel_id,
            requested_by_id: new_request.requested_by_id,
            message: new_request.message,
            status: ClosureRequestStatus::Pending,
            created_at: now,
            updated_at: now,
            reviewed_by_id: None,
            review_notes: None,
        };
        inner.closure_requests.insert(id, request.clone());
        Ok(request)
    }

    pub async fn closure_request_fetch(
        &self,
        request_id: i64,
    ) -> LookupResult<ClosureRequest> {
        let inner = self.inner.lock().await;
        inner.closure_requests.get(&request_id).cloned().ok_or_else(|| {
            Error::not_found_by_id(ResourceType::ClosureRequest, request_id)
        })
    }

    /// Record a review decision on a closure request
    pub async fn closure_request_set_decision(
        &self,
        request_id: i64,
        decision: ClosureRequestStatus,
        reviewed_by_id: i64,
        review_notes: String,
    ) -> UpdateResult<ClosureRequest> {
        let mut inner = self.inner.lock().await;
        let request =
            inner.closure_requests.get_mut(&request_id).ok_or_else(|| {
                Error::not_found_by_id(ResourceType::ClosureRequest, request_id)
            })?;
        request.status = decision;
        request.reviewed_by_id = Some(reviewed_by_id);
        request.review_notes = Some(review_notes);
        request.updated_at = Utc::now();
        Ok(request.clone())
    }

    pub async fn closure_request_delete(&self, request_id: i64) -> DeleteResult {
        let mut inner = self.inner.lock().await;
        inner.closure_requests.remove(&request_id).map(|_| ()).ok_or_else(
            || Error::not_found_by_id(ResourceType::ClosureRequest, request_id),
        )
    }

    pub async fn closure_requests_list(&self) -> ListResultVec<ClosureRequest> {
        let inner = self.inner.lock().await;
        Ok(inner.closure_requests.values().cloned().collect())
    }

    pub async fn closure_requests_list_pending(
        &self,
    ) -> ListResultVec<ClosureRequest> {
        let inner = self.inner.lock().await;
        Ok(inner
            .closure_requests
            .values()
            .filter(|request| request.status == ClosureRequestStatus::Pending)
            .cloned()
            .collect())
    }

    pub async fn closure_requests_list_for_tunnel(
        &self,
        tunnel_id: &str,
    ) -> ListResultVec<ClosureRequest> {
        let inner = self.inner.lock().await;
        Ok(inner
            .closure_requests
            .values()
            .filter(|request| request.tunnel_id == tunnel_id)
            .cloned()
            .collect())
    }

    pub async fn closure_requests_list_for_requester(
        &self,
        user_id: i64,
    ) -> ListResultVec<ClosureRequest> {
        let inner = self.inner.lock().await;
        Ok(inner
            .closure_requests
            .values()
            .filter(|request| request.requested_by_id == user_id)
            .cloned()
            .collect())
    }

    // Operations logs

    pub async fn operations_log_create(
        &self,
        new_log: OperationsLogCreate,
    ) -> CreateResult<OperationsLog> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_operations_log_id;
        inner.next_operations_log_id += 1;
        let log = OperationsLog {
            id,
            user_id: new_log.user_id,
            action: new_log.action,
            category: new_log.category,
            details: new_log.details,
            entity_id: new_log.entity_id,
            timestamp: new_log.timestamp.unwrap_or_else(Utc::now),
            environment_data: new_log.environment_data,
            hardware_impact: new_log.hardware_impact,
            ip_address: new_log.ip_address,
            user_agent: new_log.user_agent,
        };
        inner.operations_logs.insert(id, log.clone());
        Ok(log)
    }

    /// List log entries matching `filter`, newest first
    pub async fn operations_logs_list(
        &self,
        filter: &OperationsLogFilter,
    ) -> ListResultVec<OperationsLog> {
        let inner = self.inner.lock().await;
        let mut logs: Vec<OperationsLog> = inner
            .operations_logs
            .values()
            .filter(|log| {
                filter.user_id.map_or(true, |user_id| log.user_id == user_id)
            })
            .filter(|log| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |category| &log.category == category)
            })
            .filter(|log| {
                filter.start_date.map_or(true, |start| log.timestamp >= start)
            })
            .filter(|log| {
                filter.end_date.map_or(true, |end| log.timestamp <= end)
            })
            .cloned()
            .collect();
        // Entries created in the same millisecond tie on timestamp; the id
        // breaks the tie so the order is stable.
        logs.sort_by(|a, b| {
            (b.timestamp, b.id).cmp(&(a.timestamp, a.id))
        });
        let offset = filter.offset.unwrap_or(0) as usize;
        let logs = logs.into_iter().skip(offset);
        let logs = match filter.limit {
            Some(limit) => logs.take(limit as usize).collect(),
            None => logs.collect(),
        };
        Ok(logs)
    }

    /// List the log entries recorded against one entity, newest first
    pub async fn operations_logs_list_for_entity(
        &self,
        entity_id: &str,
    ) -> ListResultVec<OperationsLog> {
        let inner = self.inner.lock().await;
        let mut logs: Vec<OperationsLog> = inner
            .operations_logs
            .values()
            .filter(|log| log.entity_id.as_deref() == Some(entity_id))
            .cloned()
            .collect();
        logs.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        Ok(logs)
    }
}
