//! First-use memoized parsing keyed by predicate identity. The reference
//! integration rewrites call sites ahead of time; a library call instead
//! pays the parse once per distinct predicate source.

use crate::errors::CompileError;
use lazy_static::lazy_static;
use predicate_syntax::ast::lambda::Lambda;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::debug;

lazy_static! {
    static ref PARSE_CACHE: Mutex<HashMap<String, Arc<Lambda>>> = Mutex::new(HashMap::new());
}

/// Parse a predicate lambda, memoized on the md5 fingerprint of its
/// source text. Captures are applied per call, so only the parse is
/// shared.
pub fn parse_cached(source: &str) -> Result<Arc<Lambda>, CompileError> {
    let fingerprint = format!("{:x}", md5::compute(source));

    let mut cache = PARSE_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(lambda) = cache.get(&fingerprint) {
        debug!(%fingerprint, "predicate parse cache hit");
        return Ok(lambda.clone());
    }

    let lambda = Arc::new(predicate_syntax::parse(source)?);
    debug!(%fingerprint, "predicate parse cache miss");
    cache.insert(fingerprint, lambda.clone());

    Ok(lambda)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cached_returns_shared_ast() {
        let first = parse_cached("a => a.cachedField == 1").unwrap();
        let second = parse_cached("a => a.cachedField == 1").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_parse_cached_propagates_parse_errors() {
        assert!(parse_cached("a => a.x ==").is_err());
    }
}
