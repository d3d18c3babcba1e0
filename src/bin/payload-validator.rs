//! # Payload Validator
//!
//! A command-line utility for checking JSON payload files against the
//! built-in payload schemas before sending them to a live server.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin payload-validator connect payloads/connect.json
//! cargo run --bin payload-validator user_state --users alice,bob state/*.json
//! cargo run --bin payload-validator subscribe --connections 0f3c...,9ab1... sub.json
//! ```
//!
//! Existence checks run against the identifiers given with `--users` and
//! `--connections`; without them every lookup fails.
//!
//! ## Output
//!
//! For each file either `✓ Valid` and the loaded record, or `❌ Invalid`
//! followed by the error tree and the partial record, both as pretty JSON.
//!
//! ## Exit Codes
//!
//! - `0`: All payloads are valid
//! - `1`: One or more payloads are invalid, or a file could not be read

use serde_json::{Map, Value};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;
use stream_schema::{Preset, Registries, Schema, ValidationError};

struct Options {
    preset: Preset,
    users: HashSet<String>,
    connections: HashSet<String>,
    files: Vec<String>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args[1..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let registries = Registries {
        connections: Arc::new(options.connections),
        users: Arc::new(options.users),
    };
    let schema = match options.preset.schema(&registries) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("❌ Failed to build '{}' schema: {}", options.preset, e);
            process::exit(1);
        }
    };

    let mut valid_count = 0;
    let mut error_count = 0;
    for file in &options.files {
        if validate_file(&schema, Path::new(file)) {
            valid_count += 1;
        } else {
            error_count += 1;
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid payloads: {}", valid_count);
    println!("  Invalid payloads: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }
}

fn print_usage(program: &str) {
    let presets: Vec<&str> = Preset::ALL.iter().map(Preset::name).collect();
    eprintln!(
        "Usage: {} <{}> [--users a,b] [--connections x,y] <file>...",
        program,
        presets.join("|")
    );
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut args = args.iter();
    let preset = args
        .next()
        .ok_or("missing preset name")?
        .parse::<Preset>()?;

    let mut options = Options {
        preset,
        users: HashSet::new(),
        connections: HashSet::new(),
        files: Vec::new(),
    };

    while let Some(arg) = args.next() {
        let target = match arg.as_str() {
            "--users" => &mut options.users,
            "--connections" => &mut options.connections,
            _ => {
                options.files.push(arg.clone());
                continue;
            }
        };
        let list = args.next().ok_or(format!("{} needs a value", arg))?;
        target.extend(
            list.split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }

    if options.files.is_empty() {
        return Err("no payload files given".to_string());
    }
    Ok(options)
}

fn validate_file(schema: &Schema, path: &Path) -> bool {
    println!("\nValidating: {}", path.display());

    let payload = match read_payload(path) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("  ❌ Unreadable - {}", e);
            return false;
        }
    };

    match schema.load(&payload) {
        Ok(record) => {
            println!("  ✓ Valid");
            print_json("record", &record.into_value());
            true
        }
        Err(err) => {
            println!("  ❌ Invalid - {}", err);
            report(err);
            false
        }
    }
}

fn read_payload(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn report(err: ValidationError) {
    let (messages, partial) = err.into_parts();
    print_json("errors", &messages.to_json());
    print_json("partial", &partial);
}

fn print_json(label: &str, value: &Value) {
    let mut wrapper = Map::new();
    wrapper.insert(label.to_string(), value.clone());
    let rendered = serde_json::to_string_pretty(&wrapper).unwrap_or_else(|_| value.to_string());
    for line in rendered.lines() {
        println!("  {}", line);
    }
}
