// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fuzz target for the bounds-checked reader
//!
//! Interprets the input as a script of reads against itself.

#![no_main]

use libfuzzer_sys::fuzz_target;
use safeparcel::ParcelReader;

fuzz_target!(|data: &[u8]| {
    let mut reader = ParcelReader::new(data);
    let mut ops = data.iter().copied();

    while !reader.is_empty() {
        let Some(op) = ops.next() else {
            break;
        };
        let ok = match op % 9 {
            0 => reader.read_u32().is_ok(),
            1 => reader.read_i64().is_ok(),
            2 => reader.read_bool().is_ok(),
            3 => reader.read_f64().is_ok(),
            4 => reader.read_string().is_ok(),
            5 => reader.read_bytes().is_ok(),
            6 => reader.skip(usize::from(op >> 4)).is_ok(),
            7 => reader
                .sub_reader(usize::from(op >> 3))
                .map(|mut child| child.read_byte().is_ok())
                .is_ok(),
            _ => reader.read_byte().is_ok(),
        };
        if !ok {
            break;
        }
    }
});
