//! Loading of the CLI's input files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use dcg_sdk::{GeneratorConfig, IntrospectedInterface, ManagedObjects};

/// Contents of the `--config` TOML file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
}

/// A description file holds either one interface or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptionFile {
    Many(Vec<IntrospectedInterface>),
    One(IntrospectedInterface),
}

/// Load the generator configuration, applying `--strict` on top.
pub fn load_config(path: Option<&Path>, strict: bool) -> anyhow::Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let parsed: CliConfig = toml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            parsed.generator
        }
        None => GeneratorConfig::default(),
    };
    if strict {
        config = GeneratorConfig::strict();
    }
    debug!(?config, "loaded generator config");
    Ok(config)
}

pub fn load_descriptions(path: &Path) -> anyhow::Result<Vec<IntrospectedInterface>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading interface descriptions {}", path.display()))?;
    let file: DescriptionFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing interface descriptions {}", path.display()))?;
    Ok(match file {
        DescriptionFile::Many(descs) => descs,
        DescriptionFile::One(desc) => vec![desc],
    })
}

pub fn load_objects(path: &Path) -> anyhow::Result<ManagedObjects> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading managed objects {}", path.display()))?;
    let objects: ManagedObjects = serde_json::from_str(&text)
        .with_context(|| format!("parsing managed objects {}", path.display()))?;
    debug!(objects = objects.len(), "loaded managed objects");
    Ok(objects)
}
