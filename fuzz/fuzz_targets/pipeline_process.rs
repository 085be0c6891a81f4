//! Fuzz target for the span stages.
//!
//! Records with offsets and snippets that disagree with their content, or
//! with multibyte text, must be skipped or reported, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let _ = nerprep::pipeline::fuzz_process_slice(data);
});
