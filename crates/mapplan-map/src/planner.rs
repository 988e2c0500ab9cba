//! Entry point for resolving plans against a provider.

use mapplan_model::{PlanSet, ResolveOptions, TypeId};

use crate::provider::{MappingDeclarations, ResolutionInputs};
use crate::session::PlanSession;

/// Resolves root pairs, one independent session per request.
#[derive(Debug)]
pub struct Planner<'a, P: ?Sized> {
    inputs: &'a P,
    options: ResolveOptions,
}

impl<'a, P: ResolutionInputs + ?Sized> Planner<'a, P> {
    pub fn new(inputs: &'a P, options: ResolveOptions) -> Self {
        Self { inputs, options }
    }

    /// A fresh session over the same inputs and options.
    pub fn session(&self) -> PlanSession<'a, P> {
        PlanSession::new(self.inputs, self.options.clone())
    }

    /// Resolves `source -> dest` and every plan it reaches.
    pub fn plan(&self, source: impl Into<TypeId>, dest: impl Into<TypeId>) -> PlanSet {
        let (source, dest) = (source.into(), dest.into());
        let mut session = self.session();
        let root = session.build_plan(&source, &dest);
        let set = session.finish(root);
        tracing::debug!(
            %source,
            %dest,
            plans = set.len(),
            diagnostics = set.diagnostics.len(),
            "plan set resolved"
        );
        set
    }
}

impl<P: ResolutionInputs + MappingDeclarations + ?Sized> Planner<'_, P> {
    /// Resolves every declared pair in declaration order. Sessions share no state.
    pub fn plan_declared(&self) -> Vec<PlanSet> {
        self.inputs
            .declared_pairs()
            .into_iter()
            .map(|key| self.plan(key.source, key.dest))
            .collect()
    }
}
