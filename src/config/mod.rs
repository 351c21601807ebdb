// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for nlc
//!
//! Handles loading, saving, and validating the key/value settings store.

pub mod settings;

pub use settings::*;
