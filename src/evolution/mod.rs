//! Evolution graph queries: "how many steps from A to B".
//!
//! The graph is loaded from the scraped evolution dataset. Pathfinding is a
//! breadth-first search that returns every minimum-length path, with each
//! step tagged as a digivolution (up) or de-digivolution (down).

use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_EVOLUTION_GRAPH_PATH: &str = "data/evolutions.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionData {
    pub evolves_from: Vec<String>,
    pub evolves_to: Vec<String>,
}

pub type EvolutionGraph = HashMap<String, EvolutionData>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    /// Digivolve toward a higher form.
    Up,
    /// De-digivolve toward a lower form.
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStep {
    pub from: String,
    pub to: String,
    pub direction: StepDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionPath {
    pub steps: Vec<EvolutionStep>,
}

impl EvolutionPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

pub fn load_evolution_graph(path: impl AsRef<Path>) -> Option<EvolutionGraph> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

struct PathNode {
    name: String,
    steps: Vec<EvolutionStep>,
    visited: HashSet<String>,
}

/// All shortest paths between two Digimon. Unknown endpoints yield an empty
/// result; identical endpoints yield one empty path.
pub fn find_shortest_paths(
    source: &str,
    target: &str,
    graph: &EvolutionGraph,
) -> Vec<EvolutionPath> {
    let source = source.trim();
    let target = target.trim();
    if source == target {
        return vec![EvolutionPath { steps: Vec::new() }];
    }
    if !graph.contains_key(source) || !graph.contains_key(target) {
        return Vec::new();
    }

    let mut queue = VecDeque::new();
    queue.push_back(PathNode {
        name: source.to_string(),
        steps: Vec::new(),
        visited: HashSet::from([source.to_string()]),
    });

    let mut results = Vec::new();
    let mut min_length = usize::MAX;

    while let Some(current) = queue.pop_front() {
        if current.steps.len() >= min_length {
            continue;
        }
        for (neighbor, direction) in neighbors(graph, &current.name) {
            if current.visited.contains(neighbor) {
                continue;
            }
            let mut steps = current.steps.clone();
            steps.push(EvolutionStep {
                from: current.name.clone(),
                to: neighbor.to_string(),
                direction,
            });
            if neighbor == target {
                if steps.len() < min_length {
                    min_length = steps.len();
                    results.clear();
                }
                if steps.len() == min_length {
                    results.push(EvolutionPath { steps });
                }
                continue;
            }
            let mut visited = current.visited.clone();
            visited.insert(neighbor.to_string());
            queue.push_back(PathNode {
                name: neighbor.to_string(),
                steps,
                visited,
            });
        }
    }

    results
}

fn neighbors<'a>(
    graph: &'a EvolutionGraph,
    name: &str,
) -> Vec<(&'a str, StepDirection)> {
    let Some(data) = graph.get(name) else {
        return Vec::new();
    };
    data.evolves_to
        .iter()
        .map(|next| (next.as_str(), StepDirection::Up))
        .chain(
            data.evolves_from
                .iter()
                .map(|previous| (previous.as_str(), StepDirection::Down)),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> EvolutionGraph {
        let mut graph = EvolutionGraph::new();
        let mut insert = |name: &str, from: &[&str], to: &[&str]| {
            graph.insert(
                name.to_string(),
                EvolutionData {
                    evolves_from: from.iter().map(|s| s.to_string()).collect(),
                    evolves_to: to.iter().map(|s| s.to_string()).collect(),
                },
            );
        };
        insert("Koromon", &[], &["Agumon"]);
        insert("Agumon", &["Koromon"], &["Greymon", "Tyrannomon"]);
        insert("Greymon", &["Agumon"], &["MetalGreymon"]);
        insert("Tyrannomon", &["Agumon"], &["MetalGreymon"]);
        insert("MetalGreymon", &["Greymon", "Tyrannomon"], &[]);
        graph
    }

    #[test]
    fn direct_evolution_is_one_up_step() {
        let paths = find_shortest_paths("Agumon", "Greymon", &graph());
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 1);
        assert_eq!(paths[0].steps[0].direction, StepDirection::Up);
    }

    #[test]
    fn all_equal_length_paths_are_returned() {
        let paths = find_shortest_paths("Agumon", "MetalGreymon", &graph());
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|path| path.len() == 2));
    }

    #[test]
    fn downward_steps_are_tagged() {
        let paths = find_shortest_paths("Greymon", "Tyrannomon", &graph());
        assert_eq!(paths.len(), 1);
        let directions: Vec<StepDirection> =
            paths[0].steps.iter().map(|step| step.direction).collect();
        assert_eq!(directions, vec![StepDirection::Down, StepDirection::Up]);
    }

    #[test]
    fn same_endpoint_is_an_empty_path() {
        let paths = find_shortest_paths("Agumon", "Agumon", &graph());
        assert_eq!(paths.len(), 1);
        assert!(paths[0].is_empty());
    }

    #[test]
    fn unknown_endpoints_yield_nothing() {
        assert!(find_shortest_paths("Agumon", "Missingmon", &graph()).is_empty());
        assert!(find_shortest_paths("Missingmon", "Agumon", &graph()).is_empty());
    }
}
