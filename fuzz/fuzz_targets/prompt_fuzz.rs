//! Fuzz target for prompt assembly.
//!
//! Run with: cargo +nightly fuzz run prompt_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlagent_llm::{build_prompt, SqlDialect};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let mut mid = input.len() / 2;
    while !input.is_char_boundary(mid) {
        mid -= 1;
    }
    let (schema, question) = input.split_at(mid);
    for dialect in [
        SqlDialect::PostgreSql,
        SqlDialect::MySql,
        SqlDialect::Sqlite,
        SqlDialect::Generic,
    ] {
        let prompt = build_prompt(dialect, schema, question);
        assert!(prompt.contains(schema));
        assert!(prompt.contains(question));
        assert!(prompt.find("SCHEMA:") < prompt.find("USER QUESTION:"));
    }
});
