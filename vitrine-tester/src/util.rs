use anyhow::{Context, Result};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse seed tokens as decimal or `0x`-prefixed hex.
pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens
        .iter()
        .map(|token| {
            let parsed = token.strip_prefix("0x").map_or_else(
                || token.parse::<u64>(),
                |hex| u64::from_str_radix(hex, 16),
            );
            parsed.with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}
