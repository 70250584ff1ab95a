// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewer math and text formatting helpers.

pub mod format;
pub mod zoom;
