// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Types shared by every component of the TunnelGuard flood-monitoring
//! service
//!
//! This crate is deliberately HTTP-agnostic except for the single conversion
//! from [`api::external::Error`] into a Dropshot `HttpError`, which is how
//! internal failures are ultimately exposed to clients.

pub mod api;
