//! Treatment-group selection for microbes and a small food-web feeding simulator.
//!
//! The two halves are independent. [`search::find_best`] enumerates every fixed-size group of
//! candidate microbes and keeps the first one with the highest [`score::score`] against a
//! [`SiteProfile`]. [`foodweb::FoodWeb`] holds an "eats" graph whose calorie counters are
//! mutated one [`foodweb::FoodWeb::feed`] at a time, usually driven through a
//! [`command::Session`].

pub mod command;
pub mod config;
pub mod error;
pub mod foodweb;
pub mod io;
pub mod model;
pub mod score;
pub mod search;

pub use model::condition::{Range, Score, ScoringRules, SiteProfile};
pub use model::entity::Microbe;
pub use model::group::Group;
