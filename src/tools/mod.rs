// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset maintenance utilities behind the command line tools in `src/bin`.

pub mod extract;
pub mod sample;
pub mod scrape;
pub mod tag_filter;
pub mod uncaptioned;
