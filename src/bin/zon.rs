use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use clap::Parser;
use log::{debug, info};
use serde::Serialize;
use serde_zon::{Value, ZonOptions};

/// Converts between JSON and ZON.
#[derive(Parser, Debug)]
#[command(name = "zon", version, about = "JSON to ZON converter (and back with -j)")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Convert ZON to JSON instead of JSON to ZON.
    #[arg(short = 'j', long)]
    json: bool,

    /// Indentation per level. An empty string gives compact output.
    #[arg(short = 'i', long, value_name = "string", default_value = serde_zon::options::DEFAULT_INDENT)]
    indent: String,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    debug!("{args:?}");

    let input = read_input(args.input.as_deref())?;
    let mut output = if args.json {
        zon_to_json(&input, &args.indent)?
    } else {
        json_to_zon(&input, &args.indent)?
    };
    output.push(b'\n');

    write_output(args.output.as_deref(), &output)?;
    info!(
        "converted {} bytes into {} bytes of {}",
        input.len(),
        output.len(),
        if args.json { "JSON" } else { "ZON" }
    );
    Ok(())
}

fn json_to_zon(input: &[u8], indent: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let value: serde_json::Value = serde_json::from_slice(input)?;
    let options = ZonOptions::new().with_indent(indent);
    Ok(serde_zon::to_vec_with_options(&value, options)?)
}

fn zon_to_json(input: &[u8], indent: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    let value: Value = serde_zon::from_slice(input)?;
    let mut buffer = Vec::new();

    if indent.is_empty() {
        serde_json::to_writer(&mut buffer, &value)?;
        return Ok(buffer);
    }

    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

fn read_input(input: Option<&str>) -> Result<Vec<u8>, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read(path)?),
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) if path != "-" => fs::write(path, data)?,
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
            handle.flush()?;
        }
    }
    Ok(())
}
