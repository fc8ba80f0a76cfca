//! Random picks for recommendation blocks.
//!
//! Deliberately non-deterministic; the search pipeline never uses it.

use rand::Rng;
use rand::seq::IndexedRandom;
use spot_discovery_sdk::models::{HomeFeed, Spot};

use super::search::partition_by_category;

/// Uniformly draw `min(n, list.len())` items without replacement.
#[must_use]
pub fn sample<T: Clone>(list: &[T], n: usize) -> Vec<T> {
    sample_with(list, n, &mut rand::rng())
}

/// [`sample`] with a caller-supplied RNG, e.g. a seeded one in tests.
#[must_use]
pub fn sample_with<T: Clone, R: Rng + ?Sized>(list: &[T], n: usize, rng: &mut R) -> Vec<T> {
    list.choose_multiple(rng, n).cloned().collect()
}

/// Landing page blocks: a mixed pick and one per category.
#[must_use]
pub fn home_feed_with<R: Rng + ?Sized>(catalog: &[Spot], per_block: usize, rng: &mut R) -> HomeFeed {
    let parts = partition_by_category(catalog);
    HomeFeed {
        popular: sample_with(catalog, per_block, rng),
        attractions: sample_with(&parts.attractions, per_block, rng),
        stays: sample_with(&parts.stays, per_block, rng),
        foods: sample_with(&parts.foods, per_block, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use spot_discovery_sdk::models::SpotCategory;
    use std::collections::HashSet;

    #[test]
    fn sample_draws_without_replacement() {
        let list: Vec<u32> = (0..10).collect();
        let picked = sample(&list, 4);
        assert_eq!(picked.len(), 4);
        let distinct: HashSet<_> = picked.iter().collect();
        assert_eq!(distinct.len(), 4);
        assert!(picked.iter().all(|p| list.contains(p)));
    }

    #[test]
    fn sample_caps_at_list_length() {
        let list = vec!["a", "b"];
        assert_eq!(sample(&list, 5).len(), 2);
        assert!(sample::<u8>(&[], 3).is_empty());
        assert!(sample(&list, 0).is_empty());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let list: Vec<u32> = (0..50).collect();
        let a = sample_with(&list, 5, &mut StdRng::seed_from_u64(7));
        let b = sample_with(&list, 5, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn home_feed_blocks_respect_categories() {
        let catalog: Vec<Spot> = (0..12)
            .map(|i| Spot {
                id: Some(i.to_string()),
                name: format!("spot-{i}"),
                category: match i % 3 {
                    0 => SpotCategory::Attraction,
                    1 => SpotCategory::Stay,
                    _ => SpotCategory::Food,
                },
                ..Spot::default()
            })
            .collect();

        let feed = home_feed_with(&catalog, 3, &mut StdRng::seed_from_u64(1));
        assert_eq!(feed.popular.len(), 3);
        assert_eq!(feed.attractions.len(), 3);
        assert!(feed.stays.iter().all(|s| s.category == SpotCategory::Stay));
        assert!(feed.foods.iter().all(|s| s.category == SpotCategory::Food));
    }
}
