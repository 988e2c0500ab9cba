//! One resolution session: a memo table of plans keyed by type pair.
//!
//! A pair is marked in progress before any of its properties are resolved,
//! so a nested reference back to a pair still being built resolves to its
//! key instead of recursing. Plans are finalized once and never touched
//! again for the rest of the session.

use std::collections::{BTreeMap, VecDeque};

use mapplan_model::{
    ConverterId, Diagnostic, DiagnosticKind, MappingKind, MappingPlan, PlanKey, PlanSet,
    PrimitiveKind, PropertyMapping, PropertyOverrides, PropertySchema, ResolveOptions,
    TypeDescriptor, TypeId, TypeSchema,
};

use crate::classify::Classifier;
use crate::compat::{Compatibility, converter_applies, evaluate_types};
use crate::correspondence::{Correspondence, SourceMatch, find_property, resolve};
use crate::provider::ResolutionInputs;

#[derive(Debug)]
enum Slot {
    InProgress,
    Ready(MappingPlan),
}

/// Session-scoped plan builder. Not shared between unrelated requests.
pub struct PlanSession<'a, P: ?Sized> {
    inputs: &'a P,
    options: ResolveOptions,
    classifier: Classifier,
    memo: BTreeMap<PlanKey, Slot>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, P: ResolutionInputs + ?Sized> PlanSession<'a, P> {
    pub fn new(inputs: &'a P, options: ResolveOptions) -> Self {
        Self {
            inputs,
            options,
            classifier: Classifier::new(),
            memo: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Builds (or reuses) the plan for `source -> dest` and returns its key.
    ///
    /// A missing schema on either side yields an empty plan.
    pub fn build_plan(&mut self, source: &TypeId, dest: &TypeId) -> PlanKey {
        let key = PlanKey::new(source.clone(), dest.clone());
        if let Some(slot) = self.memo.get(&key) {
            tracing::trace!(
                %source,
                %dest,
                in_progress = matches!(slot, Slot::InProgress),
                "plan memo hit"
            );
            return key;
        }

        let _span = tracing::debug_span!("resolve_pair", %source, %dest).entered();
        self.memo.insert(key.clone(), Slot::InProgress);
        tracing::trace!(%source, %dest, "placeholder inserted");

        let plan = self.resolve_pair(&key);
        tracing::debug!(%source, %dest, mappings = plan.len(), "plan finalized");
        self.memo.insert(key.clone(), Slot::Ready(plan));
        key
    }

    /// Ends the session, keeping the plans reachable from `root`.
    pub fn finish(mut self, root: PlanKey) -> PlanSet {
        let mut plans = BTreeMap::new();
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(key) = queue.pop_front() {
            if plans.contains_key(&key) {
                continue;
            }
            if let Some(Slot::Ready(plan)) = self.memo.remove(&key) {
                queue.extend(plan.nested_keys().cloned());
                plans.insert(key, plan);
            }
        }
        PlanSet {
            root,
            plans,
            diagnostics: self.diagnostics,
        }
    }

    fn resolve_pair(&mut self, key: &PlanKey) -> MappingPlan {
        let inputs = self.inputs;
        let (Some(source), Some(dest)) = (
            self.schema_or_note(key, &key.source),
            self.schema_or_note(key, &key.dest),
        ) else {
            return MappingPlan::empty(key);
        };

        let overrides = inputs.overrides(key);
        let mut mappings = Vec::new();
        for correspondence in resolve(source, dest, overrides, self.options.name_matching) {
            if let Some(mapping) = self.map_property(key, source, &correspondence) {
                mappings.push(mapping);
            }
        }
        MappingPlan {
            source_id: key.source.clone(),
            dest_id: key.dest.clone(),
            mappings,
        }
    }

    fn schema_or_note(&mut self, key: &PlanKey, id: &TypeId) -> Option<&'a TypeSchema> {
        let inputs = self.inputs;
        let schema = inputs.schema(id);
        if schema.is_none() {
            self.note(
                key,
                None,
                DiagnosticKind::MissingSchema {
                    type_id: id.clone(),
                },
            );
        }
        schema
    }

    fn map_property(
        &mut self,
        key: &PlanKey,
        source_schema: &'a TypeSchema,
        correspondence: &Correspondence<'a>,
    ) -> Option<PropertyMapping> {
        let destination = correspondence.destination;
        let property = destination.name.as_str();
        let source = match correspondence.source {
            SourceMatch::Found(source) => source,
            SourceMatch::Missing => {
                self.note(key, Some(property), DiagnosticKind::NoCorrespondence);
                return None;
            }
            SourceMatch::DanglingRename(name) => {
                let kind = DiagnosticKind::DanglingRename {
                    source: name.to_string(),
                };
                self.note(key, Some(property), kind);
                return None;
            }
            SourceMatch::NotReadable(source) => {
                let kind = DiagnosticKind::SourceNotReadable {
                    source: source.name.clone(),
                };
                self.note(key, Some(property), kind);
                return None;
            }
        };

        let source_ty = self.classifier.classify(&source.ty);
        let dest_ty = self.classifier.classify(&destination.ty);
        let overrides = correspondence.overrides;

        let converted = overrides
            .and_then(|o| o.convert.as_ref())
            .and_then(|id| self.converter_kind(key, property, id, &source_ty, &dest_ty));
        let kind = match converted {
            Some(kind) => kind,
            None => self.structural_kind(key, property, source, &source_ty, &dest_ty)?,
        };
        let kind = self.apply_condition(key, property, source_schema, overrides, kind);

        Some(PropertyMapping {
            destination: destination.clone(),
            source: source.name.clone(),
            kind,
        })
    }

    fn converter_kind(
        &mut self,
        key: &PlanKey,
        property: &str,
        id: &ConverterId,
        source: &TypeDescriptor,
        dest: &TypeDescriptor,
    ) -> Option<MappingKind> {
        let inputs = self.inputs;
        let Some(signature) = inputs.converter(id) else {
            let kind = DiagnosticKind::UnknownConverter {
                converter: id.clone(),
            };
            self.note(key, Some(property), kind);
            return None;
        };
        if converter_applies(signature, source, dest, &mut self.classifier) {
            return Some(MappingKind::Converter(id.clone()));
        }
        let kind = DiagnosticKind::ConverterMismatch {
            converter: id.clone(),
        };
        self.note(key, Some(property), kind);
        None
    }

    fn structural_kind(
        &mut self,
        key: &PlanKey,
        property: &str,
        source: &PropertySchema,
        source_ty: &TypeDescriptor,
        dest_ty: &TypeDescriptor,
    ) -> Option<MappingKind> {
        match evaluate_types(source_ty, dest_ty) {
            Compatibility::Direct => Some(MappingKind::Direct),
            Compatibility::NumericWiden { from, to } => {
                if !from.widens_to(to) {
                    self.note(
                        key,
                        Some(property),
                        DiagnosticKind::NarrowingConversion { from, to },
                    );
                }
                Some(MappingKind::NumericWiden)
            }
            Compatibility::CollectionOfPrimitive => Some(MappingKind::CollectionOfPrimitive),
            Compatibility::Nested {
                collection,
                source: nested_source,
                dest: nested_dest,
            } => {
                for id in [&nested_source, &nested_dest] {
                    if self.inputs.schema(id).is_none() {
                        let kind = DiagnosticKind::MissingSchema {
                            type_id: id.clone(),
                        };
                        self.note(key, Some(property), kind);
                        return None;
                    }
                }
                let nested = self.build_plan(&nested_source, &nested_dest);
                Some(if collection {
                    MappingKind::CollectionOfComplex(nested)
                } else {
                    MappingKind::NestedObject(nested)
                })
            }
            Compatibility::Incompatible => {
                let kind = DiagnosticKind::Incompatible {
                    source: source.name.clone(),
                };
                self.note(key, Some(property), kind);
                None
            }
        }
    }

    /// Wraps `kind` when the condition names a readable boolean source property.
    fn apply_condition(
        &mut self,
        key: &PlanKey,
        property: &str,
        source_schema: &TypeSchema,
        overrides: Option<&PropertyOverrides>,
        kind: MappingKind,
    ) -> MappingKind {
        let Some(condition) = overrides.and_then(|o| o.condition.as_deref()) else {
            return kind;
        };
        let flag = find_property(source_schema, condition, self.options.name_matching)
            .filter(|p| p.readable)
            .filter(|p| {
                self.classifier.classify(&p.ty) == TypeDescriptor::Primitive(PrimitiveKind::Bool)
            });
        match flag {
            Some(flag) => kind.when(flag.name.clone()),
            None => {
                let diagnostic = DiagnosticKind::InvalidCondition {
                    condition: condition.to_string(),
                };
                self.note(key, Some(property), diagnostic);
                kind
            }
        }
    }

    /// Logs every omission or fallback; keeps it only when collecting.
    fn note(&mut self, key: &PlanKey, property: Option<&str>, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            pair: key.clone(),
            property: property.map(str::to_string),
            kind,
        };
        tracing::debug!(
            source = %key.source,
            dest = %key.dest,
            property = property.unwrap_or_default(),
            "{diagnostic}"
        );
        if self.options.collects_diagnostics() {
            self.diagnostics.push(diagnostic);
        }
    }
}
