//! JSON sources for microbe pools, site profiles and species lists.
//!
//! Records are read into loosely-typed shapes first so that an absent key is reported as
//! [`ModelError::MissingField`] naming the offending record, rather than a serde message.
//!
//! A microbe's trait list may be keyed `traits` or `desireable`, but not both; a record carrying
//! both keys is rejected as [`ModelError::Json`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ModelError, Result};
use crate::foodweb::{Species, SpeciesKind, SpeciesRecord};
use crate::model::condition::{Range, SiteProfile};
use crate::model::entity::{Microbe, Trait};

#[derive(Debug, Deserialize)]
struct RawMicrobe {
    name: Option<String>,
    permeability: Option<f64>,
    mobility: Option<f64>,
    energy: Option<f64>,
    #[serde(default, alias = "desireable")]
    traits: Vec<Trait>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawProfile {
    pub(crate) permeability: Option<[f64; 2]>,
    pub(crate) mobility: Option<[f64; 2]>,
    pub(crate) energy: Option<[f64; 2]>,
    pub(crate) desirable: Option<Vec<Trait>>,
    #[serde(default)]
    pub(crate) undesirable: Vec<Trait>,
}

#[derive(Debug, Deserialize)]
struct RawSpecies {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<SpeciesKind>,
    calories_needed: Option<f64>,
    calories_provided: Option<f64>,
    #[serde(default)]
    eaten_by: Vec<String>,
}

fn required<T>(value: Option<T>, record: &str, field: &'static str) -> std::result::Result<T, ModelError> {
    value.ok_or_else(|| ModelError::MissingField { record: record.to_string(), field })
}

fn record_label(name: &Option<String>, index: usize) -> String {
    name.clone().unwrap_or_else(|| format!("#{index}"))
}

impl RawMicrobe {
    fn into_microbe(self, index: usize) -> std::result::Result<Microbe, ModelError> {
        let label = record_label(&self.name, index);
        Ok(Microbe {
            name: required(self.name, &label, "name")?,
            permeability: required(self.permeability, &label, "permeability")?,
            mobility: required(self.mobility, &label, "mobility")?,
            energy: required(self.energy, &label, "energy")?,
            traits: self.traits.into_iter().collect(),
        })
    }
}

fn range(bounds: Option<[f64; 2]>, field: &'static str) -> std::result::Result<Range, ModelError> {
    let [min, max] = required(bounds, "profile", field)?;
    if min > max {
        return Err(ModelError::InvalidRange { field, min, max });
    }
    Ok(Range::new(min, max))
}

impl TryFrom<RawProfile> for SiteProfile {
    type Error = ModelError;

    fn try_from(raw: RawProfile) -> std::result::Result<Self, Self::Error> {
        Ok(SiteProfile {
            permeability: range(raw.permeability, "permeability")?,
            mobility: range(raw.mobility, "mobility")?,
            energy: range(raw.energy, "energy")?,
            desirable: required(raw.desirable, "profile", "desirable")?.into_iter().collect(),
            undesirable: raw.undesirable.into_iter().collect::<HashSet<_>>(),
        })
    }
}

impl RawSpecies {
    fn into_record(self, index: usize) -> std::result::Result<SpeciesRecord, ModelError> {
        let label = record_label(&self.name, index);
        Ok(SpeciesRecord {
            species: Species {
                name: required(self.name, &label, "name")?,
                kind: required(self.kind, &label, "type")?,
                calories_needed: required(self.calories_needed, &label, "calories_needed")?,
                calories_provided: required(self.calories_provided, &label, "calories_provided")?,
            },
            eaten_by: self.eaten_by,
        })
    }
}

pub fn parse_microbes(json: &str) -> Result<Vec<Microbe>> {
    let raw: Vec<RawMicrobe> = serde_json::from_str(json).map_err(ModelError::from)?;
    let microbes = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_microbe(i))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(microbes)
}

pub fn parse_profile(json: &str) -> Result<SiteProfile> {
    let raw: RawProfile = serde_json::from_str(json).map_err(ModelError::from)?;
    Ok(SiteProfile::try_from(raw)?)
}

pub fn parse_species(json: &str) -> Result<Vec<SpeciesRecord>> {
    let raw: Vec<RawSpecies> = serde_json::from_str(json).map_err(ModelError::from)?;
    let records = raw
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.into_record(i))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn load_microbes(path: impl AsRef<Path>) -> Result<Vec<Microbe>> {
    let path = path.as_ref();
    debug!("Loading microbes from {}", path.display());
    parse_microbes(&fs::read_to_string(path)?)
}

pub fn load_profile(path: impl AsRef<Path>) -> Result<SiteProfile> {
    let path = path.as_ref();
    debug!("Loading site profile from {}", path.display());
    parse_profile(&fs::read_to_string(path)?)
}

pub fn load_species(path: impl AsRef<Path>) -> Result<Vec<SpeciesRecord>> {
    let path = path.as_ref();
    debug!("Loading species from {}", path.display());
    parse_species(&fs::read_to_string(path)?)
}
