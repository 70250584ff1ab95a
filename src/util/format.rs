// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Human readable formatting for the image title bar.

const SIZE_UNITS: [&str; 8] = ["", "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Ratios offered when labelling an image's shape; transposes are added at lookup.
const COMMON_RATIOS: [(u32, u32); 13] = [
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 3),
    (2, 5),
    (3, 4),
    (3, 5),
    (4, 5),
    (9, 16),
    (9, 21),
    (10, 16),
];

/// Largest difference between a table ratio and the real ratio that still counts as a match.
const ASPECT_TOLERANCE: f64 = 0.05;

/// Format a byte count with binary units, e.g. `1.5KiB`.
pub fn format_size(bytes: u64) -> String {
    let mut num = bytes as f64;
    for unit in SIZE_UNITS {
        if num.abs() < 1024.0 {
            return format!("{num:3.1}{unit}B");
        }
        num /= 1024.0;
    }
    format!("{num:.1}YiB")
}

/// Describe the aspect ratio of an image by its nearest common ratio.
///
/// Returns `(a:b)` when a table entry lies within 0.05 of `width / height`,
/// otherwise an approximation anchored on the nearest entry, e.g. `(~5:0.50)`.
/// The two decimals always go on the approximated side, so portrait shapes
/// read `(~0.50:5)` and never `(~0.5:5.00)`.
pub fn format_aspect(width: u32, height: u32) -> String {
    if width == 0 || height == 0 {
        return String::from("(?:?)");
    }
    let aspect = width as f64 / height as f64;

    let candidates = COMMON_RATIOS
        .iter()
        .copied()
        .chain(COMMON_RATIOS.iter().map(|&(a, b)| (b, a)));

    let mut closest = (1, 1);
    let mut best = f64::INFINITY;
    for (a, b) in candidates {
        let diff = (a as f64 / b as f64 - aspect).abs();
        if diff < best {
            best = diff;
            closest = (a, b);
        }
    }

    if best <= ASPECT_TOLERANCE {
        return format!("({}:{})", closest.0, closest.1);
    }

    if aspect > 1.0 {
        format!("(~{}:{:.2})", closest.0, closest.0 as f64 / aspect)
    } else {
        format!("(~{:.2}:{})", closest.1 as f64 * aspect, closest.1)
    }
}
