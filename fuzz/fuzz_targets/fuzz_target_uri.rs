//! Fuzz target for target URI parsing.
//!
//! Goal: `Target::from_str` never panics, and every accepted target
//! parses back to itself from its `Display` form.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_target_uri
//! ```

#![no_main]

use hostcheck_host::Target;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(target) = text.parse::<Target>()
    {
        let again: Target = target
            .to_string()
            .parse()
            .expect("displayed target parses");
        assert_eq!(again, target);
    }
});
