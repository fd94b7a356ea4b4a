//! Static call graph supplied by an external analysis.

use crate::errors::{Error, IoResultExt, Result};
use im::{HashMap, HashSet, Vector};
use std::path::Path;

/// Mapping from a function name to its callees, in first-seen order.
///
/// May contain cycles and callees that never appear as callers (library
/// functions the instrumented build does not own). Backed by persistent
/// maps so clones handed to parallel workers are cheap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraph {
    callees: HashMap<String, Vector<String>>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` with no callees if it is not present yet.
    pub fn add_function(&mut self, function: impl Into<String>) {
        self.callees.entry(function.into()).or_default();
    }

    /// Add an edge; repeated edges are kept once.
    pub fn add_call(&mut self, caller: impl Into<String>, callee: impl Into<String>) {
        let callee = callee.into();
        let list = self.callees.entry(caller.into()).or_default();
        if !list.contains(&callee) {
            list.push_back(callee);
        }
    }

    pub fn contains(&self, function: &str) -> bool {
        self.callees.contains_key(function)
    }

    pub fn callees(&self, function: &str) -> Vec<String> {
        self.callees
            .get(function)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Functions that appear as callers
    pub fn node_count(&self) -> usize {
        self.callees.len()
    }

    pub fn edge_count(&self) -> usize {
        self.callees.values().map(Vector::len).sum()
    }

    /// Every function reachable from `root`, including `root`, in
    /// depth-first preorder.
    ///
    /// Uses an explicit stack and visits each node once, so deep chains and
    /// cycles (mutual recursion is common in C libraries) are fine.
    pub fn reachable_from(&self, root: &str) -> Vec<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![root.to_string()];

        while let Some(node) = stack.pop() {
            if visited.contains(&node) {
                continue;
            }
            visited.insert(node.clone());
            if let Some(callees) = self.callees.get(&node) {
                // Reverse so the first callee is explored first.
                for callee in callees.iter().rev() {
                    if !visited.contains(callee) {
                        stack.push(callee.clone());
                    }
                }
            }
            order.push(node);
        }

        order
    }

    /// Parse `{"caller": ["callee", ...], ...}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: std::collections::BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| Error::CallGraph(format!("expected an object of callee lists: {}", e)))?;

        let mut graph = Self::new();
        for (caller, callees) in raw {
            graph.add_function(caller.clone());
            for callee in callees {
                graph.add_call(caller.clone(), callee);
            }
        }
        Ok(graph)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).with_path(path)?;
        let graph = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded call graph with {} callers and {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(graph)
    }
}

impl<S: Into<String>> FromIterator<(S, S)> for CallGraph {
    fn from_iter<I: IntoIterator<Item = (S, S)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (caller, callee) in iter {
            graph.add_call(caller, callee);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_terminates_and_visits_once() {
        let graph: CallGraph = [("A", "B"), ("B", "A")].into_iter().collect();
        assert_eq!(graph.reachable_from("A"), vec!["A", "B"]);
    }

    #[test]
    fn test_preorder_follows_callee_order() {
        let graph: CallGraph = [("g", "h"), ("g", "i"), ("h", "j"), ("i", "j")]
            .into_iter()
            .collect();
        assert_eq!(graph.reachable_from("g"), vec!["g", "h", "j", "i"]);
    }

    #[test]
    fn test_absent_root_reaches_only_itself() {
        let graph = CallGraph::new();
        assert_eq!(graph.reachable_from("lonely"), vec!["lonely"]);
    }

    #[test]
    fn test_self_loop() {
        let graph: CallGraph = [("r", "r")].into_iter().collect();
        assert_eq!(graph.reachable_from("r"), vec!["r"]);
    }

    #[test]
    fn test_duplicate_edges_are_kept_once() {
        let mut graph = CallGraph::new();
        graph.add_call("a", "b");
        graph.add_call("a", "b");
        assert_eq!(graph.callees("a"), vec!["b"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let graph: CallGraph = (0..100_000)
            .map(|i| (format!("f{}", i), format!("f{}", i + 1)))
            .collect();
        assert_eq!(graph.reachable_from("f0").len(), 100_001);
    }

    #[test]
    fn test_from_json() {
        let graph = CallGraph::from_json_str(r#"{"g": ["h", "i"], "leaf": []}"#).unwrap();
        assert!(graph.contains("leaf"));
        assert_eq!(graph.callees("g"), vec!["h", "i"]);
        assert!(matches!(
            CallGraph::from_json_str("[1, 2]"),
            Err(Error::CallGraph(_))
        ));
    }
}
