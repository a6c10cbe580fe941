//! Basic ZON serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_zon::{from_str, to_string, to_string_pretty};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let people = vec![
        Person {
            name: "Peter".to_string(),
            age: 42,
        },
        Person {
            name: "Ada".to_string(),
            age: 36,
        },
    ];

    let zon = to_string(&people[0])?;
    println!("Compact:\n{}\n", zon);

    let pretty = to_string_pretty(&people)?;
    println!("Pretty:\n{}\n", pretty);

    let people_back: Vec<Person> = from_str(&pretty)?;
    assert_eq!(people, people_back);
    println!("✓ Round-trip successful");

    Ok(())
}
