//! Fuzz target for suite parsing and resolution.
//!
//! Goal: parsing and resolving a suite should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_suite_parser
//! ```

#![no_main]

use hostcheck_settings::{Overrides, parse_suite_toml, resolve_suite};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(cfg) = parse_suite_toml(text)
    {
        let _ = resolve_suite(cfg, "fuzz", Overrides::default());
    }
});
