use std::collections::HashSet;

use crate::model::entity::{Attribute, Microbe, Trait};
use crate::model::group::Group;
use crate::model::condition::{Score, ScoringRules, SiteProfile, POINTS_PER_CRITERION};


/// Mean permeability, mobility and energy of a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupAverages {
    pub permeability: f64,
    pub mobility: f64,
    pub energy: f64,
}

impl GroupAverages {
    pub fn of(members: &[&Microbe]) -> GroupAverages {
        let mean = |attribute| {
            members.iter().map(|m| m.attribute(attribute)).sum::<f64>() / members.len() as f64
        };
        GroupAverages {
            permeability: mean(Attribute::Permeability),
            mobility: mean(Attribute::Mobility),
            energy: mean(Attribute::Energy),
        }
    }

    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Permeability => self.permeability,
            Attribute::Mobility => self.mobility,
            Attribute::Energy => self.energy,
        }
    }
}

impl Group<'_> {
    pub fn averages(&self) -> GroupAverages {
        GroupAverages::of(self.members())
    }

    /// Union of every member's traits.
    pub fn traits(&self) -> HashSet<&Trait> {
        self.members().iter().flat_map(|m| m.traits.iter()).collect()
    }

    pub fn calc_score(&self, profile: &SiteProfile, rules: &ScoringRules) -> Score {
        score_with(self.members(), profile, rules)
    }
}

/// Scores a group with the default rules: three range checks and one desirable-trait check.
pub fn score(members: &[&Microbe], profile: &SiteProfile) -> Score {
    score_with(members, profile, &ScoringRules::default())
}

pub fn score_with(members: &[&Microbe], profile: &SiteProfile, rules: &ScoringRules) -> Score {
    let averages = GroupAverages::of(members);
    let in_range = Attribute::ALL
        .iter()
        .filter(|&&attribute| profile.range(attribute).contains(averages.get(attribute)))
        .count() as Score;

    let traits: HashSet<&Trait> = members.iter().flat_map(|m| m.traits.iter()).collect();
    let has_desirable = traits.iter().any(|t| profile.desirable.contains(*t));
    let mut passed = in_range + has_desirable as Score;

    if rules.undesired_trait_check && traits.iter().all(|t| !profile.undesirable.contains(*t)) {
        passed += 1;
    }

    passed * POINTS_PER_CRITERION
}
