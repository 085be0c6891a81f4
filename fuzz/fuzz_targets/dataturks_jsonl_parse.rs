//! Fuzz target for Dataturks JSON-lines parsing.
//!
//! Arbitrary bytes must never panic the reader; bad lines are collected
//! as malformed instead.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nerprep::ir::io_dataturks::from_dataturks_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = from_dataturks_slice(data);
});
