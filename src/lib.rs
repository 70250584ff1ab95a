// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! MaskTag - image dataset labeling
//!
//! Browse a folder of images, paint a binary mask per image and edit the
//! caption and tag sidecar files next to it. The `tools` module holds the
//! dataset maintenance utilities used by the extra binaries.

pub mod app;
pub mod config;
pub mod io;
pub mod models;
pub mod tools;
pub mod ui;
pub mod util;
