use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dcg_sdk::Value;

#[derive(Parser)]
#[command(
    name = "dcg",
    about = "dbus-client-gen: query and read GetManagedObjects() results against interface descriptions",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON file with one interface description, or a list of them (required)
    #[arg(long, global = true)]
    pub spec: Option<PathBuf>,

    /// JSON dump of a GetManagedObjects() result
    #[arg(long, global = true)]
    pub objects: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enforce D-Bus naming rules and reject duplicate properties
    #[arg(long, global = true)]
    pub strict: bool,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the generated interfaces and their properties
    Describe,
    /// Find objects implementing an interface with given property values
    Search(SearchArgs),
    /// Read properties of one object through an interface
    Read(ReadArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Interface to search for
    #[arg(short, long)]
    pub interface: String,
    /// Required property value, as NAME=JSON (bare text is taken as a string)
    #[arg(short, long = "prop", value_parser = parse_prop)]
    pub props: Vec<(String, Value)>,
    /// Fail unless exactly one object matches
    #[arg(long)]
    pub unique: bool,
    /// Invert the match
    #[arg(long)]
    pub negate: bool,
}

#[derive(Args)]
pub struct ReadArgs {
    /// Interface to read through
    #[arg(short, long)]
    pub interface: String,
    /// Object path of the object to read
    #[arg(long)]
    pub path: String,
    /// Properties to read; all declared properties if omitted
    #[arg(long = "property")]
    pub properties: Vec<String>,
}

/// Parse `NAME=JSON` into a property name and value.
pub fn parse_prop(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    if name.is_empty() {
        return Err(format!("empty property name in {raw:?}"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((name.to_string(), value))
}
