use rollfolio_core::RollfolioError;

/// Collapse a set of provider errors into a uniform `RollfolioError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - Else → `AllProvidersFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: &str,
    attempted_any: bool,
    errors: Vec<RollfolioError>,
    not_found_what: Option<String>,
) -> RollfolioError {
    if !attempted_any {
        return RollfolioError::unsupported(capability);
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, RollfolioError::NotFound { .. }))
    {
        return RollfolioError::not_found(what);
    }
    RollfolioError::AllProvidersFailed(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_when_no_attempts() {
        let e = collapse_errors("price-history", false, vec![], None);
        assert_eq!(e, RollfolioError::unsupported("price-history"));
    }

    #[test]
    fn all_not_found_collapses() {
        let errors = vec![RollfolioError::not_found("x"), RollfolioError::not_found("y")];
        let e = collapse_errors(
            "price-history",
            true,
            errors,
            Some("price history for m:1".to_string()),
        );
        match e {
            RollfolioError::NotFound { what } => assert_eq!(what, "price history for m:1"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn mixed_maps_to_all_failed() {
        let errors = vec![
            RollfolioError::not_found("x"),
            RollfolioError::provider_timeout("p", "price-history"),
        ];
        let e = collapse_errors("price-history", true, errors.clone(), Some("w".into()));
        assert_eq!(e, RollfolioError::AllProvidersFailed(errors));
    }
}
