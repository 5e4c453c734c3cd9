//! Fuzz target for snapshot files.
//!
//! Goal: parsing a snapshot and evaluating the built-in roles against it
//! should **never panic**. Query failures are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_snapshot_parser
//! ```

#![no_main]

use hostcheck_host::{SnapshotHost, parse_snapshot_toml};
use hostcheck_settings::{Overrides, builtin_suite, resolve_suite};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(facts) = parse_snapshot_toml(text) else {
        return;
    };
    let Ok(suite) = resolve_suite(builtin_suite(), "builtin", Overrides::default()) else {
        return;
    };
    let host = SnapshotHost::new("snapshot://fuzz", facts);
    let _ = hostcheck_domain::evaluate(&suite.expectations, &host);
});
