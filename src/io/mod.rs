// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images and their sidecar files.

pub mod dataset;
pub mod media;
pub mod sidecar;
pub mod trash;
