//! Plain-text outline of a plan set.

use mapplan_model::{MappingPlan, PlanSet};

/// Root plan first, then nested plans in key order, then diagnostics.
pub fn render_plan_set(set: &PlanSet) -> String {
    let mut lines = Vec::new();
    match set.root_plan() {
        Some(root) => push_plan(&mut lines, root),
        None => lines.push(format!("{}: no root plan", set.root)),
    }
    for plan in set.nested() {
        lines.push(String::new());
        push_plan(&mut lines, plan);
    }
    if !set.diagnostics.is_empty() {
        lines.push(String::new());
        lines.push("diagnostics:".to_string());
        lines.extend(set.diagnostics.iter().map(|d| format!("  {d}")));
    }
    lines.join("\n")
}

fn push_plan(lines: &mut Vec<String>, plan: &MappingPlan) {
    lines.push(format!("{} -> {}", plan.source_id, plan.dest_id));
    if plan.is_empty() {
        lines.push("  (no mappings)".to_string());
        return;
    }
    let width = plan
        .mappings
        .iter()
        .map(|m| m.destination.name.len())
        .max()
        .unwrap_or_default();
    for mapping in &plan.mappings {
        lines.push(format!(
            "  {:<width$} <- {}: {}",
            mapping.destination.name, mapping.source, mapping.kind
        ));
    }
}
