//! Schema generation pipeline
//!
//! Ties the pieces together for one input: load the type model, resolve the
//! closure of its eligible types, assemble and compile the schema set, and
//! export it. Inputs are processed one at a time and a failure on one input
//! never affects the next.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::assembler::{assemble, CompiledSchema};
use crate::error::{DiagnosticSink, Diagnostics, Error, Result};
use crate::exports::ExportConfig;
use crate::loaders::TypeModelLoader;
use crate::model::TypeModel;
use crate::resolver::ClosureResolver;

/// Configuration for schema generation
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Root element names appended after the types
    pub roots: Vec<String>,
    /// Eligible type names to seed with (empty seeds all)
    pub types: Vec<String>,
    /// Dependency search directories
    pub search_dirs: Vec<PathBuf>,
    /// Where and how schemas are written
    pub export: ExportConfig,
    /// List loaded types while processing
    pub verbose: bool,
}

impl GeneratorConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root element
    pub fn with_root(mut self, name: impl Into<String>) -> Self {
        self.roots.push(name.into());
        self
    }

    /// Set the root elements
    pub fn with_roots(mut self, names: Vec<String>) -> Self {
        self.roots = names;
        self
    }

    /// Restrict seeding to these eligible types
    pub fn with_types(mut self, names: Vec<String>) -> Self {
        self.types = names;
        self
    }

    /// Add a dependency search directory
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export = self.export.with_target_dir(dir);
        self
    }

    /// Set whether existing schema files are overwritten
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.export = self.export.with_overwrite(overwrite);
        self
    }

    /// Set verbose listing
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Result of processing one input
#[derive(Debug)]
pub struct ProcessOutcome {
    /// The type model file
    pub input: PathBuf,
    /// The written schema file
    pub output: PathBuf,
    /// The compiled schema
    pub schema: CompiledSchema,
    /// Everything reported while generating
    pub diagnostics: Diagnostics,
}

/// Results of processing a batch of inputs
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Inputs that produced a schema file
    pub succeeded: Vec<ProcessOutcome>,
    /// Inputs that failed, with the error
    pub failed: Vec<(PathBuf, Error)>,
}

impl RunSummary {
    /// Check if every input succeeded
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Schema generator
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    loader: TypeModelLoader,
}

impl Generator {
    /// Create a generator
    pub fn new(config: GeneratorConfig) -> Self {
        let loader = TypeModelLoader::new().with_search_dirs(config.search_dirs.iter().cloned());
        Self { config, loader }
    }

    /// The configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the compiled schema for a model
    ///
    /// Resolver and compile diagnostics both go to `sink`.
    pub fn generate(&self, model: &TypeModel, sink: &mut dyn DiagnosticSink) -> CompiledSchema {
        let resolution = ClosureResolver::new(model)
            .with_seed_filter(&self.config.types)
            .resolve(sink);
        let schema = assemble(resolution.fragments, &self.config.roots);
        schema.report_to(sink);
        schema
    }

    /// Load, generate and export one input
    pub fn process(&self, input: &Path) -> Result<ProcessOutcome> {
        let model = self.loader.load_from_file(input)?;
        if self.config.verbose {
            list_types(&model);
        }

        let mut diagnostics = Diagnostics::new();
        let schema = self.generate(&model, &mut diagnostics);
        let output = self.config.export.export(&schema, input)?;
        Ok(ProcessOutcome {
            input: input.to_path_buf(),
            output,
            schema,
            diagnostics,
        })
    }

    /// Process each input in turn
    pub fn run<I, P>(&self, inputs: I) -> RunSummary
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut summary = RunSummary::default();
        for input in inputs {
            let input = input.as_ref();
            match self.process(input) {
                Ok(outcome) => summary.succeeded.push(outcome),
                Err(e) => {
                    error!("{}", e);
                    summary.failed.push((input.to_path_buf(), e));
                }
            }
        }
        summary
    }
}

fn list_types(model: &TypeModel) {
    info!("Types in model");
    for t in model.known_types() {
        info!("\t{}", t.full_name);
    }
    info!("Types with contract annotation");
    for t in model.eligible_types() {
        info!("\t{}", t.full_name);
    }
}

/// Build the compiled schema for a model with the given root elements
pub fn generate_schema(
    model: &TypeModel,
    roots: &[String],
    sink: &mut dyn DiagnosticSink,
) -> CompiledSchema {
    Generator::new(GeneratorConfig::new().with_roots(roots.to_vec())).generate(model, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Diagnostic, DiagnosticKind};
    use crate::model::{MemberDescriptor, TypeDescriptor};
    use std::fs;
    use tempfile::TempDir;

    fn zoo() -> TypeModel {
        TypeModel::with_types(
            "Zoo",
            [
                TypeDescriptor::class("Person")
                    .contract(None)
                    .with_member(MemberDescriptor::parse("Shadow", "Ghost", false).unwrap()),
                TypeDescriptor::class("Animal").contract(None),
            ],
        )
    }

    #[test]
    fn test_generate_forwards_all_diagnostics() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = generate_schema(&zoo(), &["Person".to_string()], &mut sink);

        let kinds: Vec<_> = sink.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UndefinedTypeReference,
                DiagnosticKind::SchemaCompile
            ]
        );
        assert!(schema.find_element("Person").is_some());
        assert!(!schema.is_valid());
    }

    #[test]
    fn test_generate_with_type_filter() {
        let generator =
            Generator::new(GeneratorConfig::new().with_types(vec!["Animal".to_string()]));
        let mut sink: Vec<Diagnostic> = Vec::new();
        let schema = generator.generate(&zoo(), &mut sink);

        let names: Vec<_> = schema.types().map(|t| t.name()).collect();
        assert_eq!(names, vec!["Animal"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_run_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("Zoo.json");
        fs::write(
            &good,
            r#"{ "types": [ { "name": "Person", "kind": "class", "dataContract": {} } ] }"#,
        )
        .unwrap();
        let bad = dir.path().join("Broken.json");
        fs::write(&bad, "not json").unwrap();
        let missing = dir.path().join("Missing.json");

        let out = dir.path().join("out");
        let generator = Generator::new(GeneratorConfig::new().with_output_dir(&out));
        let summary = generator.run([&bad, &missing, &good]);

        assert!(!summary.is_success());
        assert_eq!(summary.failed.len(), 2);
        assert_eq!(summary.succeeded.len(), 1);
        assert_eq!(summary.succeeded[0].output, out.join("Zoo.xsd"));
        assert!(out.join("Zoo.xsd").exists());

        let again = generator.run([&good]);
        assert!(matches!(again.failed[0].1, Error::OutputExists(_)));
    }
}
