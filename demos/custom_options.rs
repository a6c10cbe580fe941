//! Customizing ZON output with ZonOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_zon::{to_string_with_options, ZonOptions};
use std::collections::HashMap;
use std::error::Error;

#[derive(Debug, Serialize)]
struct Config {
    name: String,
    version: String,
    env: HashMap<String, String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        env: [("PATH", "/usr/bin"), ("HOME", "/home/app"), ("LANG", "C")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    };

    println!("Compact (default):");
    println!("{}\n", serde_zon::to_string(&config)?);

    println!("Four-space indent:");
    println!("{}\n", to_string_with_options(&config, ZonOptions::pretty())?);

    println!("Tab indent:");
    println!("{}\n", to_string_with_options(&config, ZonOptions::new().with_indent("\t"))?);

    // HashMap iteration order varies between runs unless keys are sorted
    println!("Two-space indent, sorted map keys:");
    let options = ZonOptions::new().with_indent("  ").with_sorted_keys(true);
    println!("{}", to_string_with_options(&config, options)?);

    Ok(())
}
