//! Relational demo generator
//!
//! Produces mutually consistent `Study` and `DataObject` records: each data
//! object samples a fixed number of distinct studies, and every study's
//! `linked_data_objects` list is derived afterwards by reverse-indexing those
//! samples. The two lists therefore always agree in both directions.
//!
//! Randomness is injected so callers (and tests) control the RNG; use a
//! seeded `StdRng` for reproducible datasets.

use crate::config::{ConfigError, GeneratorConfig};
use crate::models::{Classifier, DataObject, Study, StudyIdentifier, StudyTopic};
use rand::Rng;
use rand::seq::index;

/// Error type for dataset generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A complete in-memory demo dataset for one run.
#[derive(Debug, Clone)]
pub struct DemoDataset {
    /// Shared topic pool; studies embed clones of these entries.
    pub topics: Vec<StudyTopic>,
    pub studies: Vec<Study>,
    pub data_objects: Vec<DataObject>,
}

impl DemoDataset {
    /// Generate a dataset satisfying the relational invariants.
    ///
    /// Study ids are sequential in `[0, studies)` and data-object ids in
    /// `[0, data_objects)`. Every categorical field is drawn uniformly from
    /// its configured pool, and `publication_year` uniformly from
    /// `year_range`.
    pub fn generate<R: Rng + ?Sized>(
        config: &GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;

        let topics = generate_topics(config, rng);
        let mut studies = generate_studies(config, &topics, rng);
        let data_objects = generate_data_objects(config, rng);
        link_studies(&mut studies, &data_objects);

        Ok(Self {
            topics,
            studies,
            data_objects,
        })
    }
}

/// Pick a pool element uniformly. Pools are validated non-empty up front.
fn pick<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

fn generate_topics<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Vec<StudyTopic> {
    (0..config.topics as u64)
        .map(|id| StudyTopic {
            id,
            topic_source_type: pick(&config.topic_source_types, rng).clone(),
            topic_value: pick(&config.topic_values, rng).clone(),
        })
        .collect()
}

fn generate_studies<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    topics: &[StudyTopic],
    rng: &mut R,
) -> Vec<Study> {
    (0..config.studies as u64)
        .map(|id| {
            let study_type = pick(&config.study_types, rng).clone();
            let study_topics = index::sample(rng, topics.len(), config.topics_per_study)
                .into_iter()
                .map(|i| topics[i].clone())
                .collect();
            let study_identifiers = config
                .identifier_types
                .iter()
                .map(|identifier_type| StudyIdentifier {
                    identifier_type: identifier_type.clone(),
                    identifier_value: format!("{:08}", rng.random_range(0..100_000_000u64)),
                })
                .collect();
            Study {
                id,
                display_title: format!("Demo {} study {}", study_type, id),
                study_topics,
                study_type,
                access_type: pick(&config.access_types, rng).clone(),
                publisher: pick(&config.publishers, rng).clone(),
                publication_year: rng.random_range(config.year_range.clone()),
                study_identifiers,
                // Filled in by link_studies once data objects exist.
                linked_data_objects: Vec::new(),
            }
        })
        .collect()
}

fn generate_data_objects<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<DataObject> {
    (0..config.data_objects as u64)
        .map(|id| {
            let type_index = rng.random_range(0..config.object_type_names.len());
            let object_type = Classifier::new(
                type_index as u64,
                config.object_type_names[type_index].clone(),
            );
            let related_studies = index::sample(rng, config.studies, config.studies_per_data_object)
                .into_iter()
                .map(|i| i as u64)
                .collect();
            DataObject {
                id,
                description: format!("{} for demo study data", object_type.name),
                object_type,
                access_type: pick(&config.access_types, rng).clone(),
                publication_year: rng.random_range(config.year_range.clone()),
                object_status: pick(&config.object_statuses, rng).clone(),
                url: format!("https://repository.demo/objects/{}", id),
                related_studies,
            }
        })
        .collect()
}

/// Reverse-index the data-object samples into the studies.
///
/// `linked_data_objects` is derived, never sampled on its own; this is what
/// keeps the relation bidirectionally consistent.
fn link_studies(studies: &mut [Study], data_objects: &[DataObject]) {
    for data_object in data_objects {
        for &study_id in &data_object.related_studies {
            studies[study_id as usize]
                .linked_data_objects
                .push(data_object.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            studies: 10,
            data_objects: 25,
            topics: 6,
            topics_per_study: 3,
            studies_per_data_object: 2,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_ids_unique_and_contiguous() {
        let mut rng = StdRng::seed_from_u64(7);
        let dataset = DemoDataset::generate(&small_config(), &mut rng).unwrap();

        let study_ids: Vec<u64> = dataset.studies.iter().map(|s| s.id).collect();
        assert_eq!(study_ids, (0..10).collect::<Vec<u64>>());

        let object_ids: Vec<u64> = dataset.data_objects.iter().map(|d| d.id).collect();
        assert_eq!(object_ids, (0..25).collect::<Vec<u64>>());
    }

    #[test]
    fn test_related_studies_are_distinct_fixed_size_samples() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = small_config();
        let dataset = DemoDataset::generate(&config, &mut rng).unwrap();

        for data_object in &dataset.data_objects {
            let distinct: HashSet<u64> = data_object.related_studies.iter().copied().collect();
            assert_eq!(distinct.len(), config.studies_per_data_object);
            assert!(distinct.iter().all(|&id| id < config.studies as u64));
        }
    }

    #[test]
    fn test_bidirectional_consistency() {
        let mut rng = StdRng::seed_from_u64(42);
        let dataset = DemoDataset::generate(&small_config(), &mut rng).unwrap();

        for study in &dataset.studies {
            for data_object in &dataset.data_objects {
                let linked = study.linked_data_objects.contains(&data_object.id);
                let related = data_object.related_studies.contains(&study.id);
                assert_eq!(
                    linked, related,
                    "study {} / data object {} disagree",
                    study.id, data_object.id
                );
            }
        }
    }

    #[test]
    fn test_topics_sampled_without_replacement_from_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = small_config();
        let dataset = DemoDataset::generate(&config, &mut rng).unwrap();

        assert_eq!(dataset.topics.len(), config.topics);
        for study in &dataset.studies {
            assert_eq!(study.study_topics.len(), config.topics_per_study);
            let distinct: HashSet<u64> = study.study_topics.iter().map(|t| t.id).collect();
            assert_eq!(distinct.len(), config.topics_per_study);
            for topic in &study.study_topics {
                assert_eq!(&dataset.topics[topic.id as usize], topic);
            }
        }
    }

    #[test]
    fn test_years_within_configured_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = GeneratorConfig {
            year_range: 2010..=2012,
            ..small_config()
        };
        let dataset = DemoDataset::generate(&config, &mut rng).unwrap();

        for study in &dataset.studies {
            assert!(config.year_range.contains(&study.publication_year));
        }
        for data_object in &dataset.data_objects {
            assert!(config.year_range.contains(&data_object.publication_year));
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_generation() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GeneratorConfig {
            studies: 1,
            studies_per_data_object: 5,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            DemoDataset::generate(&config, &mut rng),
            Err(GeneratorError::Config(_))
        ));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = small_config();
        let a = DemoDataset::generate(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = DemoDataset::generate(&config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a.studies, b.studies);
        assert_eq!(a.data_objects, b.data_objects);
    }
}
