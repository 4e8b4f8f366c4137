//! Type model loading
//!
//! A type model is read from a JSON description of the candidate types.
//! Dependencies named by the file are located as `<name>.json`, first next to
//! the input and then in each search directory, and loaded transitively.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{MemberDescriptor, TypeDescriptor, TypeKind, TypeModel};

/// Extension of type model files
pub const MODEL_EXTENSION: &str = "json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ModelFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct TypeEntry {
    name: String,
    #[serde(default)]
    code_namespace: Option<String>,
    kind: TypeKind,
    #[serde(default)]
    data_contract: Option<ContractEntry>,
    #[serde(default)]
    members: Vec<MemberEntry>,
    #[serde(default)]
    values: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContractEntry {
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct MemberEntry {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    data_member: Option<MemberAnnotation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct MemberAnnotation {
    #[serde(default)]
    is_required: bool,
}

impl TypeEntry {
    fn into_descriptor(self) -> Result<TypeDescriptor> {
        let mut desc = match self.kind {
            TypeKind::Class => TypeDescriptor::class(&self.name),
            TypeKind::Enum => TypeDescriptor::enumeration(&self.name, self.values),
        };
        if let Some(ns) = &self.code_namespace {
            desc = desc.with_code_namespace(ns);
        }
        if let Some(contract) = &self.data_contract {
            desc = desc.contract(contract.namespace.as_deref());
        }
        for member in self.members {
            let is_required = member.data_member.map_or(false, |dm| dm.is_required);
            let parsed = MemberDescriptor::parse(&member.name, &member.type_name, is_required)
                .map_err(|e| {
                    Error::Load(format!("{}.{}: {}", self.name, member.name, e))
                })?;
            desc = desc.with_member(parsed);
        }
        Ok(desc)
    }
}

fn parse_model(text: &str, fallback_name: &str) -> Result<(TypeModel, Vec<String>)> {
    let file: ModelFile = serde_json::from_str(text)?;
    let name = file.name.unwrap_or_else(|| fallback_name.to_string());
    let mut model = TypeModel::new(name);
    for entry in file.types {
        model.add_type(entry.into_descriptor()?);
    }
    Ok((model, file.dependencies))
}

fn read_model_file(path: &Path) -> Result<(TypeModel, Vec<String>)> {
    let text = fs::read_to_string(path).map_err(|e| {
        Error::Load(format!("Failed to read '{}': {}", path.display(), e))
    })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    parse_model(&text, &stem).map_err(|e| match e {
        Error::Json(err) => Error::Load(format!("{}: {}", path.display(), err)),
        other => other,
    })
}

/// Loader for type model files
#[derive(Debug, Clone, Default)]
pub struct TypeModelLoader {
    search_dirs: Vec<PathBuf>,
}

impl TypeModelLoader {
    /// Create a loader with no extra search directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency search directory
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Add several dependency search directories
    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Load a model and its dependencies from a file
    pub fn load_from_file(&self, path: &Path) -> Result<TypeModel> {
        info!("Processing: {}", path.display());
        let (mut model, dependencies) = read_model_file(path)?;
        let input_dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut loaded = IndexSet::new();
        loaded.insert(model.name().to_string());
        let mut pending: Vec<String> = dependencies.into_iter().rev().collect();
        while let Some(name) = pending.pop() {
            if !loaded.insert(name.clone()) {
                continue;
            }
            let dep_path = self.find_dependency(&name, input_dir).ok_or_else(|| {
                Error::Load(format!("Dependency {} of {} not found", name, model.name()))
            })?;
            debug!("Loading dependency {} from {}", name, dep_path.display());
            let (dep, more) = read_model_file(&dep_path)?;
            model.add_dependency(dep);
            pending.extend(more.into_iter().rev());
        }

        debug!(
            types = model.types().len(),
            dependency_types = model.dependency_types().len(),
            "loaded type model {}",
            model.name()
        );
        Ok(model)
    }

    /// Locate `<name>.json` next to the input or in a search directory
    pub fn find_dependency(&self, name: &str, input_dir: &Path) -> Option<PathBuf> {
        let file_name = format!("{}.{}", name, MODEL_EXTENSION);
        std::iter::once(input_dir)
            .chain(self.search_dirs.iter().map(PathBuf::as_path))
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }
}

/// Parse a model from JSON text without resolving dependencies
pub fn load_from_str(text: &str) -> Result<TypeModel> {
    parse_model(text, "").map(|(model, _)| model)
}
