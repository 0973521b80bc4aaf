//! Directed "eats" graph with per-species calorie state.
//!
//! An edge `A -> B` means `A` eats `B`. Producers never have outgoing edges.

use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FoodWebError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeciesKind {
    Producer,
    Consumer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    pub name: String,
    pub kind: SpeciesKind,
    pub calories_needed: f64,
    pub calories_provided: f64,
}

impl Species {
    pub fn is_producer(&self) -> bool {
        self.kind == SpeciesKind::Producer
    }
}

/// A species plus the names of the species that eat it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesRecord {
    pub species: Species,
    pub eaten_by: Vec<String>,
}

/// Position of a species in the web, derived from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrophicLayer {
    Producer = 0,
    PrimaryConsumer = 1,
    Mixed = 2,
    SecondaryConsumer = 3,
    Apex = 4,
}

impl TrophicLayer {
    pub fn level(&self) -> u8 {
        *self as u8
    }
}

/// Result of a single feeding event.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    Fed { predator: String, prey: Vec<String>, portion: f64 },
    NotFound(String),
    /// Producers do not feed.
    NoOp(String),
    NoPrey(String),
    InsufficientCalories { predator: String, needed: f64, available: f64 },
}

impl FeedOutcome {
    pub fn is_fed(&self) -> bool {
        matches!(self, FeedOutcome::Fed { .. })
    }
}

impl fmt::Display for FeedOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedOutcome::Fed { predator, prey, portion } => {
                write!(f, "{predator} ate {} (each gave {portion:.1} cal)", prey.join(", "))
            }
            FeedOutcome::NotFound(name) => write!(f, "'{name}' not found in food web"),
            FeedOutcome::NoOp(name) => write!(f, "'{name}' is a producer and does not eat"),
            FeedOutcome::NoPrey(name) => write!(f, "'{name}' has no prey"),
            FeedOutcome::InsufficientCalories { predator, needed, available } => write!(
                f,
                "Not enough calories among prey of '{predator}' ({available} available, {needed} needed); it remains hungry"
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FoodWeb {
    graph: DiGraph<Species, ()>,
    index: HashMap<String, NodeIndex>,
}

impl FoodWeb {
    pub fn build(records: Vec<SpeciesRecord>) -> Result<FoodWeb, FoodWebError> {
        let mut web = FoodWeb::default();
        let mut eaten_by = Vec::with_capacity(records.len());
        for record in records {
            let name = record.species.name.clone();
            if web.index.contains_key(&name) {
                return Err(FoodWebError::DuplicateSpecies(name));
            }
            let node = web.graph.add_node(record.species);
            web.index.insert(name, node);
            eaten_by.push((node, record.eaten_by));
        }

        for (prey, predators) in eaten_by {
            for predator_name in predators {
                let Some(&predator) = web.index.get(&predator_name) else {
                    warn!(predator = %predator_name, prey = %web.graph[prey].name, "skipping unknown predator");
                    continue;
                };
                if web.graph[predator].is_producer() {
                    return Err(FoodWebError::ProducerEats {
                        producer: predator_name,
                        prey: web.graph[prey].name.clone(),
                    });
                }
                web.graph.update_edge(predator, prey, ());
            }
        }
        Ok(web)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn species(&self, name: &str) -> Option<&Species> {
        self.index.get(name).map(|&node| &self.graph[node])
    }

    /// All species in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.graph.node_indices().map(move |node| &self.graph[node])
    }

    fn node(&self, name: &str) -> Result<NodeIndex, FoodWebError> {
        self.index.get(name).copied().ok_or_else(|| FoodWebError::NotFound(name.to_string()))
    }

    /// Neighbours in insertion order. petgraph walks adjacency lists newest-first.
    fn neighbors(&self, node: NodeIndex, direction: Direction) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.graph.neighbors_directed(node, direction).collect();
        nodes.sort();
        nodes
    }

    fn names(&self, nodes: Vec<NodeIndex>) -> Vec<&str> {
        nodes.into_iter().map(|n| self.graph[n].name.as_str()).collect()
    }

    pub fn prey_of(&self, name: &str) -> Result<Vec<&str>, FoodWebError> {
        let node = self.node(name)?;
        Ok(self.names(self.neighbors(node, Direction::Outgoing)))
    }

    pub fn predators_of(&self, name: &str) -> Result<Vec<&str>, FoodWebError> {
        let node = self.node(name)?;
        Ok(self.names(self.neighbors(node, Direction::Incoming)))
    }

    pub fn trophic_layer(&self, name: &str) -> Result<TrophicLayer, FoodWebError> {
        let node = self.node(name)?;
        if self.graph[node].is_producer() {
            return Ok(TrophicLayer::Producer);
        }
        if self.graph.neighbors_directed(node, Direction::Incoming).next().is_none() {
            return Ok(TrophicLayer::Apex);
        }

        let prey = self.neighbors(node, Direction::Outgoing);
        let producers = prey.iter().filter(|&&p| self.graph[p].is_producer()).count();
        let layer = match producers {
            0 => TrophicLayer::SecondaryConsumer,
            n if n == prey.len() => TrophicLayer::PrimaryConsumer,
            _ => TrophicLayer::Mixed,
        };
        Ok(layer)
    }

    /// Consumers ordered by calories provided, highest first.
    pub fn eating_order(&self) -> Vec<&Species> {
        let mut consumers: Vec<&Species> = self.iter().filter(|s| !s.is_producer()).collect();
        consumers.sort_by(|a, b| b.calories_provided.total_cmp(&a.calories_provided));
        consumers
    }

    /// Runs one feeding event for `predator_name`.
    ///
    /// The predator eats every prey tied at the highest `calories_provided`. If those prey
    /// together cannot cover `calories_needed` nothing changes. Otherwise each tied prey
    /// gives an equal share of the need, unclamped, and the predator's need drops to zero.
    pub fn feed(&mut self, predator_name: &str) -> FeedOutcome {
        let Some(&predator) = self.index.get(predator_name) else {
            return FeedOutcome::NotFound(predator_name.to_string());
        };
        if self.graph[predator].is_producer() {
            return FeedOutcome::NoOp(predator_name.to_string());
        }

        let prey = self.neighbors(predator, Direction::Outgoing);
        let Some(max_provided) = prey
            .iter()
            .map(|&p| self.graph[p].calories_provided)
            .max_by(f64::total_cmp)
        else {
            return FeedOutcome::NoPrey(predator_name.to_string());
        };

        let best_prey: Vec<NodeIndex> = prey
            .into_iter()
            .filter(|&p| self.graph[p].calories_provided == max_provided)
            .collect();
        let available: f64 = best_prey.iter().map(|&p| self.graph[p].calories_provided).sum();
        let needed = self.graph[predator].calories_needed;
        if available < needed {
            debug!(predator = predator_name, needed, available, "predator remains hungry");
            return FeedOutcome::InsufficientCalories {
                predator: predator_name.to_string(),
                needed,
                available,
            };
        }

        let portion = needed / best_prey.len() as f64;
        for &p in &best_prey {
            self.graph[p].calories_provided -= portion;
        }
        self.graph[predator].calories_needed = 0.0;

        let prey: Vec<String> = self.names(best_prey).into_iter().map(str::to_string).collect();
        debug!(predator = predator_name, ?prey, portion, "feeding event applied");
        FeedOutcome::Fed { predator: predator_name.to_string(), prey, portion }
    }
}
