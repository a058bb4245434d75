//! Phase-dependency graph.
//!
//! Built once per scan, after all records are in: one node per distinct
//! phase (declared or merely referenced), one edge per declared dependency.
//! Cycles are errors; phases referenced but never declared are dangling and
//! warned about exactly once each, no matter how many records reference
//! them.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::core::record::MetadataRecord;
use crate::issues::{IssueKind, Severity, ValidationIssue};

#[derive(Debug)]
pub struct DependencyGraph {
    /// phase -> union of declared dependencies across all member records.
    edges: BTreeMap<String, BTreeSet<String>>,
    /// Phases declared by at least one record or pre-declared by config.
    declared: BTreeSet<String>,
}

impl DependencyGraph {
    /// Build the graph from the complete record set.
    ///
    /// `predeclared` phases count as declared even when no scanned record
    /// carries them, so dependencies on them are not dangling.
    pub fn build(records: &[MetadataRecord], predeclared: &[String]) -> Self {
        let mut edges: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut declared: BTreeSet<String> = predeclared.iter().cloned().collect();

        for record in records {
            let Some(phase) = record.phase.as_deref() else {
                continue;
            };
            declared.insert(phase.to_string());
            let deps = edges.entry(phase.to_string()).or_default();
            if let Some(dependencies) = &record.dependencies {
                deps.extend(dependencies.iter().cloned());
            }
        }

        // Referenced-only phases become nodes too, with no outgoing edges.
        let referenced: Vec<String> = edges
            .values()
            .flat_map(|deps| deps.iter().cloned())
            .collect();
        for phase in referenced {
            edges.entry(phase).or_default();
        }

        Self { edges, declared }
    }

    /// All phases in the graph, declared and dangling alike.
    pub fn phases(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn dependencies_of(&self, phase: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(phase)
    }

    pub fn is_dangling(&self, phase: &str) -> bool {
        !self.declared.contains(phase)
    }

    /// Phases referenced as dependencies but never declared, sorted.
    pub fn dangling(&self) -> Vec<&str> {
        self.edges
            .keys()
            .filter(|phase| self.is_dangling(phase))
            .map(String::as_str)
            .collect()
    }

    /// Distinct cycles, each listed in traversal order starting from the
    /// phase that closed it.
    ///
    /// Three-color depth-first traversal: unvisited, in-progress, done. An
    /// edge back into an in-progress node closes a cycle. Nodes are entered
    /// in sorted order so the result is deterministic.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }

        let mut colors: BTreeMap<&str, Color> =
            self.edges.keys().map(|p| (p.as_str(), Color::White)).collect();
        let mut cycles: Vec<Vec<String>> = Vec::new();
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        fn visit<'a>(
            phase: &'a str,
            edges: &'a BTreeMap<String, BTreeSet<String>>,
            colors: &mut BTreeMap<&'a str, Color>,
            path: &mut Vec<&'a str>,
            cycles: &mut Vec<Vec<String>>,
            seen: &mut HashSet<Vec<String>>,
        ) {
            colors.insert(phase, Color::Gray);
            path.push(phase);

            if let Some(deps) = edges.get(phase) {
                for dep in deps {
                    match colors.get(dep.as_str()).copied() {
                        Some(Color::White) => {
                            visit(dep, edges, colors, path, cycles, seen);
                        }
                        Some(Color::Gray) => {
                            let start = path.iter().position(|p| *p == dep.as_str()).unwrap_or(0);
                            let cycle: Vec<String> =
                                path[start..].iter().map(|p| p.to_string()).collect();
                            // Normalize rotation so the same cycle found from
                            // two entry points is reported once.
                            let mut normalized = cycle.clone();
                            if let Some(min_pos) = normalized
                                .iter()
                                .enumerate()
                                .min_by_key(|(_, p)| p.as_str())
                                .map(|(i, _)| i)
                            {
                                normalized.rotate_left(min_pos);
                            }
                            if seen.insert(normalized) {
                                cycles.push(cycle);
                            }
                        }
                        Some(Color::Black) | None => {}
                    }
                }
            }

            path.pop();
            colors.insert(phase, Color::Black);
        }

        let phases: Vec<&str> = self.edges.keys().map(String::as_str).collect();
        let mut path = Vec::new();
        for phase in phases {
            if colors.get(phase) == Some(&Color::White) {
                visit(phase, &self.edges, &mut colors, &mut path, &mut cycles, &mut seen);
            }
        }

        cycles
    }

    /// Graph-level issues: one error per distinct cycle, one warning per
    /// dangling phase.
    pub fn issues(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for cycle in self.cycles() {
            let mut chain = cycle.clone();
            chain.push(cycle[0].clone());
            issues.push(ValidationIssue::graph(
                Severity::Error,
                IssueKind::DependencyCycle,
                cycle[0].clone(),
                format!("Dependency cycle detected: {}", chain.join(" -> ")),
            ));
        }

        for phase in self.dangling() {
            issues.push(ValidationIssue::graph(
                Severity::Warning,
                IssueKind::DanglingDependency,
                phase,
                format!("Dependency '{}' is never declared as a phase", phase),
            ));
        }

        issues
    }
}
