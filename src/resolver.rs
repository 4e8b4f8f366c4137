//! Type closure resolution
//!
//! Starting from the eligible types, every custom type name referenced by an
//! emitted fragment is resolved in rounds until a round discovers nothing
//! new. A name is emitted at most once and reported undefined at most once,
//! which also terminates reference cycles.

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::emitter::{emit, emit_primitive_list, SchemaFragment, ARRAY_PREFIX};
use crate::error::{Diagnostic, DiagnosticKind, DiagnosticSink, Severity};
use crate::model::{TypeDescriptor, TypeModel};
use crate::primitives::PrimitiveKind;

/// Result of resolving the closure of one type model
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Fragments in emission order
    pub fragments: Vec<SchemaFragment>,
    /// Names given a fragment
    pub emitted: IndexSet<String>,
    /// Names reported as undefined
    pub undefined: IndexSet<String>,
    /// Number of rounds after seeding
    pub rounds: usize,
}

impl Resolution {
    fn record(&mut self, name: String, fragment: SchemaFragment, next: &mut Vec<String>) {
        next.extend(fragment.referenced_type_names.iter().cloned());
        self.emitted.insert(name);
        self.fragments.push(fragment);
    }

    /// Check if a name was resolved either way
    pub fn is_settled(&self, name: &str) -> bool {
        self.emitted.contains(name) || self.undefined.contains(name)
    }
}

/// Fixpoint resolver over a type model
#[derive(Debug)]
pub struct ClosureResolver<'a> {
    model: &'a TypeModel,
    only: Vec<String>,
}

impl<'a> ClosureResolver<'a> {
    /// Create a resolver over a model
    pub fn new(model: &'a TypeModel) -> Self {
        Self {
            model,
            only: Vec::new(),
        }
    }

    /// Seed only the eligible types with these simple names
    ///
    /// An empty list seeds every eligible type.
    pub fn with_seed_filter(mut self, names: &[String]) -> Self {
        self.only = names.to_vec();
        self
    }

    fn seeds(&self) -> Vec<&'a TypeDescriptor> {
        let seeds: Vec<_> = self
            .model
            .eligible_types()
            .filter(|t| self.only.is_empty() || self.only.contains(&t.name))
            .collect();
        for name in &self.only {
            if !seeds.iter().any(|t| &t.name == name) {
                warn!("Requested type {} is not an eligible type of {}", name, self.model.name());
            }
        }
        seeds
    }

    /// Run the resolver to fixpoint
    pub fn resolve(&self, sink: &mut dyn DiagnosticSink) -> Resolution {
        let mut resolution = Resolution::default();
        let mut candidates = Vec::new();

        for t in self.seeds() {
            if resolution.emitted.contains(&t.name) {
                sink.report(
                    Diagnostic::new(
                        DiagnosticKind::DuplicateTypeName,
                        Severity::Warning,
                        format!(
                            "Type {} has the same name as an emitted type and is skipped",
                            t.full_name
                        ),
                    )
                    .with_type_name(&t.name),
                );
                continue;
            }
            report_ambiguities(t, sink);
            resolution.record(t.name.clone(), emit(t, false), &mut candidates);
        }
        debug!(
            seeds = resolution.emitted.len(),
            references = candidates.len(),
            "seeded closure"
        );

        while !candidates.is_empty() {
            resolution.rounds += 1;
            let mut next = Vec::new();
            for name in candidates {
                if resolution.is_settled(&name) {
                    continue;
                }

                let (key, is_list_wrapper) = match name.strip_prefix(ARRAY_PREFIX) {
                    Some(rest) if !rest.is_empty() => (rest, true),
                    _ => (name.as_str(), false),
                };

                if is_list_wrapper {
                    if let Some(kind) = PrimitiveKind::from_xsd_local_name(key) {
                        resolution.record(name, emit_primitive_list(kind), &mut next);
                        continue;
                    }
                }

                match self.model.find(key) {
                    Some(t) => {
                        if !is_list_wrapper {
                            report_ambiguities(t, sink);
                        }
                        resolution.record(name, emit(t, is_list_wrapper), &mut next);
                    }
                    None => {
                        sink.report(Diagnostic::undefined_type(name.as_str(), key));
                        resolution.undefined.insert(name);
                    }
                }
            }
            debug!(
                round = resolution.rounds,
                emitted = resolution.emitted.len(),
                discovered = next.len(),
                "closure round finished"
            );
            candidates = next;
        }

        resolution
    }
}

fn report_ambiguities(t: &TypeDescriptor, sink: &mut dyn DiagnosticSink) {
    for member in &t.members {
        if let Some(reason) = member.ambiguity() {
            sink.report(Diagnostic::ambiguous_shape(&t.name, &member.name, reason));
        }
    }
}

/// Resolve the closure of every eligible type in a model
pub fn resolve(model: &TypeModel, sink: &mut dyn DiagnosticSink) -> Resolution {
    ClosureResolver::new(model).resolve(sink)
}
