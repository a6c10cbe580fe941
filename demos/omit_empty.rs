//! Leaving empty fields out of the output.
//!
//! Run with: cargo run --example omit_empty

use serde::{Deserialize, Serialize};
use serde_zon::{from_str, to_string_pretty};
use std::error::Error;

#[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
struct Dependency {
    url: String,
    #[serde(default, skip_serializing_if = "serde_zon::is_empty")]
    hash: String,
    #[serde(default, skip_serializing_if = "serde_zon::is_empty")]
    lazy: bool,
    #[serde(rename = "path", default, skip_serializing_if = "serde_zon::is_empty")]
    local_path: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let minimal = Dependency {
        url: "https://example.com/minimal.tar.gz".to_string(),
        ..Default::default()
    };
    let full = Dependency {
        url: "https://example.com/full.tar.gz".to_string(),
        hash: "1220abcdef".to_string(),
        lazy: true,
        local_path: Some("../full".to_string()),
    };

    let minimal_zon = to_string_pretty(&minimal)?;
    println!("Only non-empty fields:\n{}\n", minimal_zon);
    println!("Everything set:\n{}\n", to_string_pretty(&full)?);

    // Omitted fields come back as their defaults
    let back: Dependency = from_str(&minimal_zon)?;
    assert_eq!(back, minimal);
    println!("✓ Round-trip successful");

    Ok(())
}
