//! Code lists for running the engine over several symbols.
//!
//! Each code gets its own engine and its own position; nothing is shared
//! between them.

use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),

    #[error("all codes failed to load")]
    AllCodesFailed,
}

pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if !seen.insert(code.clone()) {
            return Err(UniverseError::DuplicateCode(code));
        }
        codes.push(code);
    }

    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_basic() {
        let result = parse_codes("AAPL,MSFT,NVDA").unwrap();
        assert_eq!(result, vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn parse_codes_trims_and_uppercases() {
        let result = parse_codes("  aapl , Msft ,nvda").unwrap();
        assert_eq!(result, vec!["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn parse_codes_single() {
        assert_eq!(parse_codes("SPY").unwrap(), vec!["SPY"]);
    }

    #[test]
    fn parse_codes_empty_token() {
        assert!(matches!(parse_codes("AAPL,,MSFT"), Err(UniverseError::EmptyToken)));
        assert!(matches!(parse_codes(""), Err(UniverseError::EmptyToken)));
    }

    #[test]
    fn parse_codes_duplicate_is_case_insensitive() {
        let result = parse_codes("AAPL,MSFT,aapl");
        assert!(matches!(result, Err(UniverseError::DuplicateCode(s)) if s == "AAPL"));
    }
}
