// assembly builds named noise graphs from a JSON document

pub mod models;

use std::collections::BTreeMap;
use std::sync::Arc;

use noise_core::{
    Fbm2D, OpenSimplex, Perlin2D, Quality, RandomSource, Scale2D, Select2D, SharedNoise2D, seeded,
};
use thiserror::Error;

use crate::models::{
    FBM_2D, GeneratorDoc, NoiseDoc, OPEN_SIMPLEX_2D, PERLIN_2D, SCALE_2D, SELECT_2D, SourceDoc,
};

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("invalid noise document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("source '{source_name}' references unknown seed '{seed}'")]
    UnknownSeed { source_name: String, seed: String },
    #[error("generator '{generator}' references unknown source '{source_name}'")]
    UnknownSource {
        generator: String,
        source_name: String,
    },
    #[error("generator '{generator}' references unknown generator '{reference}'")]
    UnknownGenerator { generator: String, reference: String },
    #[error("source '{source_name}' has unknown type '{kind}'")]
    UnknownSourceType { source_name: String, kind: String },
    #[error("generator '{generator}' has unknown type '{kind}'")]
    UnknownGeneratorType { generator: String, kind: String },
    #[error("source '{source_name}' has invalid perlin quality {quality} (expected 0, 1 or 2)")]
    InvalidQuality { source_name: String, quality: i64 },
    #[error("generator '{generator}' of type '{kind}' needs {expected} inputs, found {found}")]
    MissingInputs {
        generator: String,
        kind: String,
        expected: usize,
        found: usize,
    },
    #[error("generator '{generator}' is part of a reference cycle")]
    Cycle { generator: String },
    #[error("sources must be built before generators")]
    SourcesNotBuilt,
}

// A noise document plus the fields built from it.
// Sources are built first (build_sources), then generators (build_generators).
#[derive(Default)]
pub struct NoiseBank {
    doc: NoiseDoc,
    sources: Option<BTreeMap<String, SharedNoise2D>>,
    generators: BTreeMap<String, SharedNoise2D>,
}

impl NoiseBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_doc(doc: NoiseDoc) -> Self {
        Self {
            doc,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AssemblyError> {
        Ok(Self::from_doc(serde_json::from_str(json)?))
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AssemblyError> {
        Ok(Self::from_doc(serde_json::from_slice(bytes)?))
    }

    pub fn to_json_pretty(&self) -> Result<String, AssemblyError> {
        Ok(serde_json::to_string_pretty(&self.doc)?)
    }

    pub fn doc(&self) -> &NoiseDoc {
        &self.doc
    }

    // Editing the document drops whatever was built from it
    fn invalidate(&mut self) {
        self.sources = None;
        self.generators.clear();
    }

    pub fn insert_seed(&mut self, name: &str, seed: i64) {
        self.doc.seeds.insert(name.to_string(), seed);
        self.invalidate();
    }

    pub fn insert_source(&mut self, name: &str, source: SourceDoc) {
        self.doc.sources.insert(name.to_string(), source);
        self.invalidate();
    }

    pub fn insert_generator(&mut self, name: &str, generator: GeneratorDoc) {
        self.doc.generators.insert(name.to_string(), generator);
        self.invalidate();
    }

    // Build every source. Sources naming the same seed draw from one shared
    // random source, created by `seed_builder` the first time the seed is used.
    pub fn build_sources<R, F>(&mut self, mut seed_builder: F) -> Result<(), AssemblyError>
    where
        R: RandomSource,
        F: FnMut(i64) -> R,
    {
        let mut rngs: BTreeMap<&str, R> = BTreeMap::new();
        let mut built = BTreeMap::new();

        for (name, entry) in &self.doc.sources {
            let seed = self
                .doc
                .seeds
                .get(&entry.seed)
                .copied()
                .ok_or_else(|| AssemblyError::UnknownSeed {
                    source_name: name.clone(),
                    seed: entry.seed.clone(),
                })?;
            let rng = rngs
                .entry(entry.seed.as_str())
                .or_insert_with(|| {
                    log::debug!("seeding random source '{}' with {}", entry.seed, seed);
                    seed_builder(seed)
                });

            let source = build_source(name, entry, rng)?;
            log::debug!("built source '{}' ({}, seed '{}')", name, entry.source_type, entry.seed);
            built.insert(name.clone(), source);
        }

        self.sources = Some(built);
        self.generators.clear();
        Ok(())
    }

    // build_sources with the default ChaCha8 seeding
    pub fn build_sources_default(&mut self) -> Result<(), AssemblyError> {
        self.build_sources(|seed| seeded(seed as u64))
    }

    // Build every generator, following references between generators
    pub fn build_generators(&mut self) -> Result<(), AssemblyError> {
        let sources = self.sources.as_ref().ok_or(AssemblyError::SourcesNotBuilt)?;
        let mut built = BTreeMap::new();
        let mut visiting = Vec::new();

        for name in self.doc.generators.keys() {
            resolve(&self.doc, sources, &mut built, &mut visiting, name)?;
        }

        self.generators = built;
        Ok(())
    }

    pub fn source(&self, name: &str) -> Option<SharedNoise2D> {
        self.sources.as_ref()?.get(name).cloned()
    }

    pub fn generator(&self, name: &str) -> Option<SharedNoise2D> {
        self.generators.get(name).cloned()
    }

    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.generators.keys().map(String::as_str)
    }
}

fn build_source<R: RandomSource>(
    name: &str,
    entry: &SourceDoc,
    rng: &mut R,
) -> Result<SharedNoise2D, AssemblyError> {
    match entry.source_type.as_str() {
        PERLIN_2D => {
            let code = entry.quality.unwrap_or(1);
            let quality = Quality::try_from(code).map_err(|quality| AssemblyError::InvalidQuality {
                source_name: name.to_string(),
                quality,
            })?;
            Ok(Arc::new(Perlin2D::new(rng, quality)))
        }
        OPEN_SIMPLEX_2D => Ok(Arc::new(OpenSimplex::new(rng))),
        other => Err(AssemblyError::UnknownSourceType {
            source_name: name.to_string(),
            kind: other.to_string(),
        }),
    }
}

// Build generator `name` and everything it depends on.
// `visiting` holds the chain of generators currently being resolved.
fn resolve(
    doc: &NoiseDoc,
    sources: &BTreeMap<String, SharedNoise2D>,
    built: &mut BTreeMap<String, SharedNoise2D>,
    visiting: &mut Vec<String>,
    name: &str,
) -> Result<SharedNoise2D, AssemblyError> {
    if let Some(done) = built.get(name) {
        return Ok(Arc::clone(done));
    }
    if visiting.iter().any(|v| v == name) {
        return Err(AssemblyError::Cycle {
            generator: name.to_string(),
        });
    }
    let Some(entry) = doc.generators.get(name) else {
        // references are checked by the caller, so this is a top-level name
        return Err(AssemblyError::UnknownGenerator {
            generator: name.to_string(),
            reference: name.to_string(),
        });
    };

    visiting.push(name.to_string());

    let mut source_inputs = Vec::with_capacity(entry.sources.len());
    for source_name in &entry.sources {
        let source = sources
            .get(source_name)
            .ok_or_else(|| AssemblyError::UnknownSource {
                generator: name.to_string(),
                source_name: source_name.clone(),
            })?;
        source_inputs.push(Arc::clone(source));
    }
    let mut generator_inputs = Vec::with_capacity(entry.generators.len());
    for reference in &entry.generators {
        if !doc.generators.contains_key(reference) {
            return Err(AssemblyError::UnknownGenerator {
                generator: name.to_string(),
                reference: reference.clone(),
            });
        }
        generator_inputs.push(resolve(doc, sources, built, visiting, reference)?);
    }

    visiting.pop();

    // fBm2d reads its sources first, the other operators their generators
    let inputs = if entry.generator_type == FBM_2D {
        [source_inputs, generator_inputs].concat()
    } else {
        [generator_inputs, source_inputs].concat()
    };

    let generator = build_generator(name, entry, &inputs)?;
    log::debug!(
        "built generator '{}' ({}, {} inputs)",
        name,
        entry.generator_type,
        inputs.len()
    );
    built.insert(name.to_string(), Arc::clone(&generator));
    Ok(generator)
}

fn require_inputs(
    name: &str,
    kind: &str,
    inputs: &[SharedNoise2D],
    expected: usize,
) -> Result<(), AssemblyError> {
    if inputs.len() < expected {
        return Err(AssemblyError::MissingInputs {
            generator: name.to_string(),
            kind: kind.to_string(),
            expected,
            found: inputs.len(),
        });
    }
    if inputs.len() > expected {
        log::warn!(
            "generator '{}' ({}) ignores {} extra inputs",
            name,
            kind,
            inputs.len() - expected
        );
    }
    Ok(())
}

fn build_generator(
    name: &str,
    entry: &GeneratorDoc,
    inputs: &[SharedNoise2D],
) -> Result<SharedNoise2D, AssemblyError> {
    let kind = entry.generator_type.as_str();
    match kind {
        FBM_2D => {
            require_inputs(name, kind, inputs, 1)?;
            Ok(Arc::new(Fbm2D::with_params(
                Arc::clone(&inputs[0]),
                entry.octaves.unwrap_or(1),
                entry.persistence.unwrap_or(0.5),
                entry.lacunarity.unwrap_or(2.0),
                entry.frequency.unwrap_or(1.0),
            )))
        }
        SELECT_2D => {
            require_inputs(name, kind, inputs, 3)?;
            let select = Select2D::new(
                Arc::clone(&inputs[0]),
                Arc::clone(&inputs[1]),
                Arc::clone(&inputs[2]),
                entry.lower_bound.unwrap_or(-1.0),
                entry.upper_bound.unwrap_or(1.0),
            )
            .with_edge_falloff(entry.edge_falloff.unwrap_or(0.0));
            Ok(Arc::new(select))
        }
        SCALE_2D => {
            require_inputs(name, kind, inputs, 1)?;
            Ok(Arc::new(Scale2D::new(
                Arc::clone(&inputs[0]),
                entry.scale.unwrap_or(1.0),
                entry.bias.unwrap_or(0.0),
            )))
        }
        other => Err(AssemblyError::UnknownGeneratorType {
            generator: name.to_string(),
            kind: other.to_string(),
        }),
    }
}
