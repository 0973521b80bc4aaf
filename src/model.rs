pub mod entity {
    use std::collections::HashSet;

    pub type Name = String;
    pub type Trait = String;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Attribute {
        Permeability,
        Mobility,
        Energy,
    }

    impl Attribute {
        pub const ALL: [Attribute; 3] = [Attribute::Permeability, Attribute::Mobility, Attribute::Energy];

        pub fn key(&self) -> &'static str {
            match self {
                Attribute::Permeability => "permeability",
                Attribute::Mobility => "mobility",
                Attribute::Energy => "energy",
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Microbe {
        pub name: Name,
        pub permeability: f64,
        pub mobility: f64,
        pub energy: f64,
        pub traits: HashSet<Trait>,
    }

    impl Microbe {
        pub fn new(name: impl Into<Name>, permeability: f64, mobility: f64, energy: f64) -> Microbe {
            Microbe {
                name: name.into(),
                permeability,
                mobility,
                energy,
                traits: HashSet::new(),
            }
        }

        pub fn with_traits<I, T>(mut self, traits: I) -> Microbe
        where
            I: IntoIterator<Item = T>,
            T: Into<Trait>,
        {
            self.traits.extend(traits.into_iter().map(Into::into));
            self
        }

        pub fn attribute(&self, attribute: Attribute) -> f64 {
            match attribute {
                Attribute::Permeability => self.permeability,
                Attribute::Mobility => self.mobility,
                Attribute::Energy => self.energy,
            }
        }
    }
}


pub mod group {
    use std::ptr;

    use super::entity::{Microbe, Name};
    use crate::error::ModelError;

    /// A duplicate-free selection of microbes borrowed from a candidate pool.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Group<'a> {
        members: Vec<&'a Microbe>,
    }

    impl<'a> Group<'a> {
        /// Caller guarantees `members` holds no microbe twice.
        pub(crate) fn new(members: Vec<&'a Microbe>) -> Group<'a> {
            Group { members }
        }

        /// Rejects a selection that refers to the same microbe more than once.
        pub fn try_new(members: Vec<&'a Microbe>) -> Result<Group<'a>, ModelError> {
            for (i, member) in members.iter().enumerate() {
                if members[..i].iter().any(|other| ptr::eq(*other, *member)) {
                    return Err(ModelError::DuplicateMember(member.name.clone()));
                }
            }
            Ok(Group { members })
        }

        pub fn members(&self) -> &[&'a Microbe] {
            &self.members
        }

        pub fn names(&self) -> Vec<&Name> {
            self.members.iter().map(|m| &m.name).collect()
        }

        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }
    }
}

pub mod condition {
    use std::collections::HashSet;
    use std::fmt;
    use super::entity::{Attribute, Trait};

    pub type Score = u32;

    pub const POINTS_PER_CRITERION: Score = 20;

    /// Closed interval `[min, max]`.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Range {
        pub min: f64,
        pub max: f64,
    }

    impl Range {
        pub fn new(min: f64, max: f64) -> Range {
            Range { min, max }
        }

        pub fn contains(&self, value: f64) -> bool {
            self.min <= value && value <= self.max
        }
    }

    impl fmt::Display for Range {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct SiteProfile {
        pub permeability: Range,
        pub mobility: Range,
        pub energy: Range,
        pub desirable: HashSet<Trait>,
        pub undesirable: HashSet<Trait>,
    }

    impl SiteProfile {
        pub fn range(&self, attribute: Attribute) -> Range {
            match attribute {
                Attribute::Permeability => self.permeability,
                Attribute::Mobility => self.mobility,
                Attribute::Energy => self.energy,
            }
        }
    }

    impl Default for SiteProfile {
        fn default() -> Self {
            SiteProfile {
                permeability: Range::new(1.0, 2.0),
                mobility: Range::new(2.0, 4.0),
                energy: Range::new(8.0, 10.0),
                desirable: HashSet::from(["Aerobic".to_string()]),
                undesirable: HashSet::new(),
            }
        }
    }

    /// Which criteria the scorer applies on top of the range and desirable-trait checks.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ScoringRules {
        pub undesired_trait_check: bool,
    }

    impl ScoringRules {
        pub fn max_score(&self) -> Score {
            let criteria = Attribute::ALL.len() as Score + 1 + self.undesired_trait_check as Score;
            criteria * POINTS_PER_CRITERION
        }
    }
}
