// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Loading captured envelopes from disk.

use anyhow::{bail, Context};
use std::path::Path;

/// Read `path` as raw bytes, or as hex text when `hex` is set.
pub fn read_input(path: &Path, hex: bool) -> anyhow::Result<Vec<u8>> {
    if hex {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_hex_text(&text).with_context(|| format!("invalid hex in {}", path.display()))
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Parse hex digits, ignoring whitespace and `#` comments.
pub fn parse_hex_text(text: &str) -> anyhow::Result<Vec<u8>> {
    let digits: String = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::chars)
        .filter(|c| !c.is_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        bail!("odd number of hex digits ({})", digits.len());
    }
    Ok(hex::decode(&digits)?)
}

/// Space-separated hex of at most `limit` bytes, with an ellipsis if cut.
pub fn hex_preview(bytes: &[u8], limit: usize) -> String {
    let shown: Vec<String> = bytes
        .iter()
        .take(limit)
        .map(|b| format!("{:02x}", b))
        .collect();
    let mut out = shown.join(" ");
    if bytes.len() > limit {
        out.push_str(" ...");
    }
    out
}
