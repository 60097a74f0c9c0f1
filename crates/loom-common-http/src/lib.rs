// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for Loom.
//!
//! Every Loom SDK builds its reqwest client from here so requests carry a
//! consistent User-Agent header.

mod client;

pub use client::{builder, user_agent, PLATFORM};
