// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Mask editing state: raster layer, brush, history and the painting session.

pub mod brush;
pub mod history;
pub mod mask;
pub mod painter;
