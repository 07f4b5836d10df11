//! Declaration input for non-interactive runs: files and `--set` pairs.

use std::path::Path;
use std::str::FromStr;

use zakat_rechner::category::AssetCategory;
use zakat_rechner::declaration::AssetDeclaration;

/// Parses a `key=value` argument. The key must be a known category; the value
/// is kept raw and normalized later.
pub fn parse_assignment(arg: &str) -> Result<(AssetCategory, String), String> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", arg))?;
    let category = AssetCategory::from_str(key).map_err(|e| e.to_string())?;
    Ok((category, value.trim().to_string()))
}

/// Reads a declaration from a `.json` or `.toml` file.
pub fn load_declaration(path: &Path) -> Result<AssetDeclaration, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    let declaration = match extension.to_ascii_lowercase().as_str() {
        "toml" => toml::from_str(&content)?,
        "json" => serde_json::from_str(&content)?,
        other => return Err(format!("unsupported declaration format '{}' (use .json or .toml)", other).into()),
    };
    tracing::debug!(path = %path.display(), "loaded declaration");
    Ok(declaration)
}

/// Applies `--set` overrides on top of `base`.
pub fn apply_assignments(base: AssetDeclaration, assignments: &[(AssetCategory, String)]) -> AssetDeclaration {
    assignments
        .iter()
        .fold(base, |decl, (category, raw)| decl.with_raw(*category, raw))
}
