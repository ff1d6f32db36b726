use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::adversary::{Adversary, Difficulty, Tier};
use crate::balance::{self, Finding};
use crate::config::ConvertOptions;
use crate::content::{builtin_monsters, builtin_names};
use crate::monster::Monster;
use crate::pipeline::Pipeline;
use crate::scaling::{self, Preset};
use crate::tables::TierReference;

/// Document syntax of a monster, adversary or options file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    Json,
    Yaml,
}

impl DocFormat {
    /// `.yaml`/`.yml` read as YAML; everything else as JSON.
    pub fn from_path(path: &Path) -> DocFormat {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocFormat::Yaml,
            _ => DocFormat::Json,
        }
    }
}

pub fn parse_doc<T: DeserializeOwned>(text: &str, format: DocFormat) -> Result<T> {
    match format {
        DocFormat::Json => serde_json::from_str(text).context("invalid JSON"),
        DocFormat::Yaml => serde_yaml::from_str(text).context("invalid YAML"),
    }
}

/// Parse decoded file text, picking the syntax from the file extension.
/// `what` names the document in error messages.
pub fn parse_file_text<T: DeserializeOwned>(text: &str, path: &Path, what: &str) -> Result<T> {
    parse_doc(text, DocFormat::from_path(path))
        .with_context(|| format!("failed to parse {}: {}", what, path.display()))
}

pub fn load_monster(path: impl AsRef<Path>) -> Result<Monster> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read monster: {}", path.display()))?;
    parse_file_text(&text, path, "monster")
}

pub fn builtin_monster(id: &str) -> Result<Monster> {
    let key = id.trim().to_lowercase().replace(&[' ', '-'][..], "_");
    let text = builtin_monsters().get(key.as_str()).copied().ok_or_else(|| {
        anyhow!(
            "unknown builtin monster '{}' (available: {})",
            id,
            builtin_names().join(", ")
        )
    })?;
    serde_json::from_str(text).with_context(|| format!("failed to parse builtin monster: {}", key))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConvertRequest {
    #[serde(default)]
    pub monster_id: Option<String>,
    #[serde(default)]
    pub monster_path: Option<String>,
    #[serde(default)]
    pub options: ConvertOptions,
}

/// Resolve the request's monster, by builtin id first, then by path.
pub fn resolve_monster(req: &ConvertRequest) -> Result<Monster> {
    match (&req.monster_id, &req.monster_path) {
        (Some(id), _) => builtin_monster(id),
        (None, Some(path)) => load_monster(path),
        (None, None) => bail!("either monster_id or monster_path must be provided"),
    }
}

pub fn convert_monster(monster: &Monster, options: &ConvertOptions) -> Result<Adversary> {
    Pipeline::default()
        .run(monster, options)
        .with_context(|| format!("failed to convert {}", monster.name))
}

pub fn convert(req: &ConvertRequest) -> Result<Adversary> {
    let monster = resolve_monster(req)?;
    convert_monster(&monster, &req.options)
}

pub fn rescale_tier(adversary: &Adversary, tier: u8) -> Result<Adversary> {
    let target = Tier::new(tier).context("invalid target tier")?;
    Ok(scaling::rescale_tier(
        adversary,
        target,
        &TierReference::standard(),
    ))
}

pub fn rescale_difficulty(adversary: &Adversary, difficulty: &str) -> Result<Adversary> {
    let target = Difficulty::parse(difficulty).context("invalid target difficulty")?;
    Ok(scaling::rescale_difficulty(
        adversary,
        target,
        &TierReference::standard(),
    ))
}

pub fn quick_adjust(adversary: &Adversary, preset: &str) -> Result<Adversary> {
    let preset: Preset = preset.parse().context("invalid preset")?;
    Ok(scaling::quick_adjust(adversary, preset))
}

pub fn check(adversary: &Adversary) -> Vec<Finding> {
    balance::check(adversary, &TierReference::standard())
}
