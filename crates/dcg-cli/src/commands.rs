use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde_json::json;

use dcg_sdk::{ClientGenerator, InterfaceSet, ManagedObjects, ObjectPath, Value};

use crate::cli::*;
use crate::config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let generator_config = config::load_config(cli.config.as_deref(), cli.strict)?;
    let spec = require_spec(cli.spec.as_deref())?;
    let descs = config::load_descriptions(spec)?;
    let interfaces = ClientGenerator::new(generator_config)
        .generate_all(&descs)
        .context("generating client artifacts")?;

    match cli.command {
        Command::Describe => cmd_describe(&interfaces, cli.format),
        Command::Search(args) => {
            let objects = require_objects(cli.objects.as_deref())?;
            cmd_search(&interfaces, &objects, args, cli.format)
        }
        Command::Read(args) => {
            let objects = require_objects(cli.objects.as_deref())?;
            cmd_read(&interfaces, &objects, args, cli.format)
        }
    }
}

fn require_spec(path: Option<&Path>) -> anyhow::Result<&Path> {
    path.ok_or_else(|| anyhow!("--spec is required"))
}

fn require_objects(path: Option<&Path>) -> anyhow::Result<ManagedObjects> {
    let path = path.ok_or_else(|| anyhow!("--objects is required for this command"))?;
    config::load_objects(path)
}

fn cmd_describe(interfaces: &InterfaceSet, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let specs: Vec<_> = interfaces.iter().map(|generated| generated.spec().as_ref()).collect();
            println!("{}", serde_json::to_string_pretty(&specs)?);
        }
        OutputFormat::Text => {
            for generated in interfaces.iter() {
                println!("{} ({})", generated.name().bold(), generated.accessor().type_name().cyan());
                for property in generated.accessor().property_names() {
                    println!("  {}", property);
                }
            }
        }
    }
    Ok(())
}

fn cmd_search(
    interfaces: &InterfaceSet,
    objects: &ManagedObjects,
    args: SearchArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let generated = interfaces
        .get(&args.interface)
        .ok_or_else(|| anyhow!("unknown interface {}", args.interface))?;

    let mut query = generated.query(args.props)?;
    if args.negate {
        query = query.negation();
    }
    if args.unique {
        query = query.require_unique_match();
    }

    let paths: Vec<ObjectPath> = query.search_paths(objects)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&paths)?),
        OutputFormat::Text => {
            for path in &paths {
                println!("{}", path.as_str().yellow());
            }
            println!("{} {} match(es)", "✓".green(), paths.len());
        }
    }
    Ok(())
}

fn cmd_read(
    interfaces: &InterfaceSet,
    objects: &ManagedObjects,
    args: ReadArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let generated = interfaces
        .get(&args.interface)
        .ok_or_else(|| anyhow!("unknown interface {}", args.interface))?;
    let entry = objects
        .get(args.path.as_str())
        .ok_or_else(|| anyhow!("no object at {}", args.path))?;
    let accessor = generated.accessor().wrap(entry)?;

    let names: Vec<String> = if args.properties.is_empty() {
        accessor.accessor_type().property_names().map(str::to_string).collect()
    } else {
        args.properties
    };

    let mut values: BTreeMap<String, Value> = BTreeMap::new();
    for name in names {
        let value = accessor.read(&name)?;
        values.insert(name, value.clone());
    }

    match format {
        OutputFormat::Json => {
            let out = json!({ "path": args.path, "interface": generated.name(), "properties": values });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            println!("{} {}", args.path.yellow().bold(), generated.name().dimmed());
            for (name, value) in &values {
                println!("  {} = {}", name.bold(), value);
            }
        }
    }
    Ok(())
}
