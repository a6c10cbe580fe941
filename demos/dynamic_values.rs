//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_zon::{from_str, from_value, to_string_pretty, to_value, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct Server {
    host: String,
    port: u16,
    mode: String,
}

const INPUT: &str = r#"
// Decoded without knowing the shape up front
.{
    .host = "localhost",
    .port = 0x1F90,
    .mode = .production,
    .features = .{ "auth", "logging" },
    .limits = .{ .rps = 250, .burst = 1.5 },
}
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let config: Value = from_str(INPUT)?;

    if let Some(port) = config.get("port").and_then(Value::as_u64) {
        println!("port (hex in the source): {}", port);
    }
    if let Some(mode) = config.get("mode").and_then(Value::as_str) {
        println!("mode (from a dot-atom): {}", mode);
    }
    if let Some(features) = config.get("features").and_then(Value::as_array) {
        println!("features: {} items", features.len());
    }
    if let Some(burst) = config.get("limits").and_then(|l| l.get("burst")) {
        println!("burst is a float: {}\n", burst.is_float());
    }

    // Unknown members are skipped when converting to a typed value
    let server: Server = from_value(config.clone())?;
    println!("Typed view: {:?}\n", server);

    let value = to_value(&server)?;
    println!("Back to Value:\n{}\n", to_string_pretty(&value)?);

    println!("Type checks:");
    println!("  is_object: {}", value.is_object());
    println!("  is_array:  {}", value.is_array());
    println!("  is_string: {}", value.is_string());

    Ok(())
}
