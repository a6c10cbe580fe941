//! Using the zon! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_zon::{to_string, to_string_pretty, zon, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Primitives:");
    println!("  null:     {}", zon!(null));
    println!("  bool:     {}", zon!(true));
    println!("  number:   {}", zon!(42));
    println!("  text:     {}", zon!("Hello, ZON!"));
    println!("  dot-atom: {}\n", zon!(".release"));

    println!("Arrays:");
    println!("  {}\n", to_string(&zon!([1, "two", true, null]))?);

    let manifest = zon!({
        "name": "my_app",
        "version": "1.0.0",
        "paths": ["build.zig", "build.zig.zon", "src"],
        "dependencies": {
            "zlib": {
                "url": "https://example.com/zlib.tar.gz",
                "lazy": true
            }
        }
    });

    println!("Nested structures:");
    println!("{}\n", to_string_pretty(&manifest)?);

    let targets: Vec<Value> = ["x86_64", "aarch64", "riscv64"]
        .iter()
        .map(|arch| Value::String(format!(".{arch}")))
        .collect();
    let build = zon!({
        "optimize": ".ReleaseSafe",
        "targets": targets
    });

    println!("Dynamic construction:");
    println!("{}\n", build);

    if let Some(Value::Object(deps)) = manifest.get("dependencies") {
        println!("Accessing values:");
        println!("  Dependencies: {}", deps.len());
        if let Some(url) = deps.get("zlib").and_then(|d| d.get("url")).and_then(Value::as_str) {
            println!("  zlib url: {}", url);
        }
    }

    Ok(())
}
