//! Fuzz target for the completion sanitizer.
//!
//! Run with: cargo +nightly fuzz run sanitize_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlagent_llm::clean_sql;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let cleaned = clean_sql(input);

        assert!(cleaned.len() <= input.len(), "cleaning never grows the text");
        assert_eq!(cleaned, cleaned.trim(), "output is always trimmed");

        if !input.trim().starts_with("```") {
            assert_eq!(cleaned, input.trim(), "unfenced text is only trimmed");
        }

        // cleaned text is a substring of the input
        assert!(input.contains(cleaned.as_str()));
    }
});
