use super::index::SearchIndex;
use super::types::{Document, RandomRequest};
use crate::error::{Result, ServiceError};

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Picks `min(n, |index|)` documents as a pure function of `seed` and the index contents.
///
/// Ids are sorted before sampling so two indexes holding the same documents
/// produce the same sample regardless of insertion order.
pub fn random_sample(index: &SearchIndex, seed: u64, n: usize) -> Vec<Document> {
    let mut ids = index.ids();
    if ids.is_empty() || n == 0 {
        return Vec::new();
    }
    ids.sort();

    let amount = n.min(ids.len());
    let mut rng = StdRng::seed_from_u64(seed);

    rand::seq::index::sample(&mut rng, ids.len(), amount)
        .into_iter()
        .filter_map(|position| index.get(&ids[position]).cloned())
        .collect()
}

pub fn sample_request(index: &SearchIndex, request: &RandomRequest) -> Result<Vec<Document>> {
    if request.n < 0 {
        return Err(ServiceError::InvalidArgument(format!(
            "n must not be negative, got {}",
            request.n
        )));
    }
    let seed = request.seed.unwrap_or(0) as u64;
    Ok(random_sample(index, seed, request.n as usize))
}
