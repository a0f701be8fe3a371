use crate::domain::errors::TradeError;

/// Validated trading pair symbol in `BASE/QUOTE` form (e.g. "BTC/USDT").
///
/// Input is trimmed and uppercased before validation, so "btc/usdt" and
/// "BTC/USDT" name the same pair. Both segments must be non-empty and
/// ASCII-alphabetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(String);

impl Symbol {
    pub fn parse(raw: &str) -> Result<Self, TradeError> {
        let normalized = raw.trim().to_uppercase();

        let mut parts = normalized.split('/');
        let (base, quote) = match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(quote), None) => (base, quote),
            _ => {
                return Err(TradeError::validation(
                    "symbol",
                    "must be in BASE/QUOTE format (e.g. BTC/USDT)",
                ))
            }
        };

        let alphabetic =
            |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic());
        if !alphabetic(base) || !alphabetic(quote) {
            return Err(TradeError::validation(
                "symbol",
                "segments must be alphabetic (e.g. BTC/USDT)",
            ));
        }

        Ok(Symbol(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
