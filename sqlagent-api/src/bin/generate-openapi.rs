//! OpenAPI document generator binary
//!
//! Prints the sqlagent OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p sqlagent-api --bin generate-openapi > openapi.json

use sqlagent_api::ApiDoc;

fn main() {
    match ApiDoc::to_pretty_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI spec: {}", e);
            std::process::exit(1);
        }
    }
}
