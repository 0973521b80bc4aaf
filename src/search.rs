use itertools::Itertools;
use tracing::{debug, info};

use crate::error::SearchError;
use crate::model::entity::Microbe;
use crate::model::group::Group;
use crate::model::condition::{Score, ScoringRules, SiteProfile};
use crate::score::GroupAverages;

pub const DEFAULT_GROUP_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub group: Group<'a>,
    pub score: Score,
}

impl Selection<'_> {
    pub fn averages(&self) -> GroupAverages {
        self.group.averages()
    }
}

fn check_pool(pool: &[Microbe], group_size: usize) -> Result<(), SearchError> {
    if group_size == 0 {
        return Err(SearchError::InvalidGroupSize);
    }
    if pool.is_empty() {
        return Err(SearchError::EmptyPool);
    }
    if pool.len() < group_size {
        return Err(SearchError::InsufficientCandidates { needed: group_size, available: pool.len() });
    }
    Ok(())
}

/// Combinations of `group_size` microbes in input order, each with its score.
fn scored_combinations<'a, 'p>(
    pool: &'a [Microbe],
    profile: &'p SiteProfile,
    group_size: usize,
    rules: ScoringRules,
) -> impl Iterator<Item = Selection<'a>> + 'p
where
    'a: 'p,
{
    pool.iter().combinations(group_size).map(move |members| {
        let group = Group::new(members);
        let score = group.calc_score(profile, &rules);
        debug!(names = ?group.names(), score, "scored combination");
        Selection { group, score }
    })
}

pub fn find_best<'a>(
    pool: &'a [Microbe],
    profile: &SiteProfile,
    group_size: usize,
) -> Result<Selection<'a>, SearchError> {
    find_best_with(pool, profile, group_size, ScoringRules::default())
}

/// Exhaustively scores every combination and keeps the first one with the highest score.
/// A group is only recorded when it beats the current best, which starts at zero.
pub fn find_best_with<'a>(
    pool: &'a [Microbe],
    profile: &SiteProfile,
    group_size: usize,
    rules: ScoringRules,
) -> Result<Selection<'a>, SearchError> {
    check_pool(pool, group_size)?;
    pick_best(scored_combinations(pool, profile, group_size, rules))
}

/// First selection whose score beats every earlier one, starting from zero.
pub fn pick_best<'a, I>(selections: I) -> Result<Selection<'a>, SearchError>
where
    I: IntoIterator<Item = Selection<'a>>,
{
    let mut best: Option<Selection<'a>> = None;
    let mut best_score: Score = 0;
    for selection in selections {
        if selection.score > best_score {
            best_score = selection.score;
            best = Some(selection);
        }
    }

    let best = best.ok_or(SearchError::NoCandidate)?;
    info!(names = ?best.group.names(), score = best.score, "selected group");
    Ok(best)
}

/// Every combination with its score, in enumeration order.
pub fn rank_all<'a>(
    pool: &'a [Microbe],
    profile: &SiteProfile,
    group_size: usize,
    rules: ScoringRules,
) -> Result<Vec<Selection<'a>>, SearchError> {
    check_pool(pool, group_size)?;
    Ok(scored_combinations(pool, profile, group_size, rules).collect())
}
