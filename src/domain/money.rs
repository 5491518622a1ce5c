use super::ParseError;

/// Money is carried as a plain float, the way balances have always been
/// written to the record files ("5", "12.5", "-3.25").
pub type Amount = f64;

/// Currency symbols that may prefix a chore cost such as "$5.00".
pub const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

/// Format an amount for display with two decimals.
/// Example: 5.0 -> "5.00", -1.5 -> "-1.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Format an amount the way it is written to a record: the shortest text
/// that parses back to the same value.
/// Example: 5.0 -> "5", 12.25 -> "12.25"
pub fn encode_amount(amount: Amount) -> String {
    amount.to_string()
}

/// Parse a stored balance line.
/// Exactly one trailing punctuation character is dropped first, so "12.50$"
/// and "12.50." both read as 12.5.
pub fn parse_balance(input: &str) -> Result<Amount, ParseError> {
    let trimmed = strip_trailing_punctuation(input.trim());
    trimmed
        .parse::<Amount>()
        .map_err(|_| ParseError::InvalidAmount {
            value: input.to_string(),
        })
}

/// Parse a chore cost token into an amount at accrual time.
/// One trailing punctuation character goes first, then one leading currency
/// symbol: "$5.00" -> 5.0, "5." -> 5.0, "€2.5" -> 2.5.
pub fn parse_cost(input: &str) -> Result<Amount, ParseError> {
    let trimmed = strip_trailing_punctuation(input.trim());
    let trimmed = trimmed
        .strip_prefix(|c: char| CURRENCY_SYMBOLS.contains(&c))
        .unwrap_or(trimmed);

    trimmed
        .trim()
        .parse::<Amount>()
        .map_err(|_| ParseError::InvalidAmount {
            value: input.to_string(),
        })
}

fn strip_trailing_punctuation(input: &str) -> &str {
    match input.chars().last() {
        Some(c) if c.is_ascii_punctuation() => &input[..input.len() - c.len_utf8()],
        _ => input,
    }
}
