use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

// Recognized sourceType values
pub const PERLIN_2D: &str = "perlin2d";
pub const OPEN_SIMPLEX_2D: &str = "opensimplex2d";

// Recognized generatorType values
pub const FBM_2D: &str = "fBm2d";
pub const SELECT_2D: &str = "select2d";
pub const SCALE_2D: &str = "scale2d";

// Older documents spell every key in PascalCase ("Seeds", "SourceType", ...)
// and write empty lists as null. Both are accepted on load, any other key is
// rejected so a misspelled section cannot load as an empty one.
// null reads as the empty/default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Whole noise document: named seeds, base sources and composed generators
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoiseDoc {
    #[serde(default, alias = "Seeds", deserialize_with = "null_as_default")]
    pub seeds: BTreeMap<String, i64>,
    #[serde(default, alias = "Sources", deserialize_with = "null_as_default")]
    pub sources: BTreeMap<String, SourceDoc>,
    #[serde(default, alias = "Generators", deserialize_with = "null_as_default")]
    pub generators: BTreeMap<String, GeneratorDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceDoc {
    #[serde(alias = "SourceType")]
    pub source_type: String, // "perlin2d" or "opensimplex2d"
    // perlin2d only: 0 fast, 1 standard, 2 high
    #[serde(default, alias = "Quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<i64>,
    #[serde(alias = "Seed")]
    pub seed: String, // name of an entry in `seeds`
}

impl SourceDoc {
    pub fn perlin2d(seed: &str, quality: i64) -> Self {
        Self {
            source_type: PERLIN_2D.to_string(),
            quality: Some(quality),
            seed: seed.to_string(),
        }
    }

    pub fn opensimplex2d(seed: &str) -> Self {
        Self {
            source_type: OPEN_SIMPLEX_2D.to_string(),
            quality: None,
            seed: seed.to_string(),
        }
    }
}

// An operator over sources and/or other generators.
// fBm2d takes its input from `sources` first, select2d and scale2d from
// `generators` first; the other list follows.
// Parameters left out take the operator's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratorDoc {
    #[serde(alias = "GeneratorType")]
    pub generator_type: String, // "fBm2d", "select2d" or "scale2d"
    #[serde(
        default,
        alias = "Sources",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sources: Vec<String>,
    #[serde(
        default,
        alias = "Generators",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub generators: Vec<String>,

    // fBm2d
    #[serde(default, alias = "Octaves", skip_serializing_if = "Option::is_none")]
    pub octaves: Option<u32>,
    #[serde(default, alias = "Persistence", skip_serializing_if = "Option::is_none")]
    pub persistence: Option<f64>,
    #[serde(default, alias = "Lacunarity", skip_serializing_if = "Option::is_none")]
    pub lacunarity: Option<f64>,
    #[serde(default, alias = "Frequency", skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,

    // select2d
    #[serde(default, alias = "LowerBound", skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,
    #[serde(default, alias = "UpperBound", skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    #[serde(default, alias = "EdgeFalloff", skip_serializing_if = "Option::is_none")]
    pub edge_falloff: Option<f64>,

    // scale2d
    #[serde(default, alias = "Scale", skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, alias = "Bias", skip_serializing_if = "Option::is_none")]
    pub bias: Option<f64>,
}

impl GeneratorDoc {
    pub fn new(generator_type: &str) -> Self {
        Self {
            generator_type: generator_type.to_string(),
            ..Self::default()
        }
    }

    pub fn with_sources(mut self, sources: &[&str]) -> Self {
        self.sources = sources.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_generators(mut self, generators: &[&str]) -> Self {
        self.generators = generators.iter().map(|g| g.to_string()).collect();
        self
    }
}
