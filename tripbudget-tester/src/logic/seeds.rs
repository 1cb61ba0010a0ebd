use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("no seeds given")]
    Empty,
    #[error("invalid seed {0:?}: expected an unsigned integer")]
    Invalid(String),
}

/// Parse `--seeds` tokens. Duplicates are dropped, first occurrence wins.
///
/// # Errors
///
/// Returns an error for an empty list or a token that is not a `u64`.
pub fn resolve_seeds(tokens: &[String]) -> Result<Vec<u64>, SeedError> {
    if tokens.is_empty() {
        return Err(SeedError::Empty);
    }
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        let seed = token
            .parse::<u64>()
            .map_err(|_| SeedError::Invalid(token.clone()))?;
        if !seeds.contains(&seed) {
            seeds.push(seed);
        }
    }
    Ok(seeds)
}
