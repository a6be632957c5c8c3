//! Env file value checks with helpful warnings
//!
//! Provides consistent validation for optional settings with:
//! - Clear warning messages for invalid values
//! - Levenshtein-based typo suggestions (values and key names)
//! - Fallback to default values

use super::types::ConfigWarning;

/// Validator for an enumerated env file value
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    /// Create a new validator for the given variable
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse a value, falling back to `default` and recording a warning if invalid
    pub fn parse_or_warn<T, F>(
        &self,
        value: &str,
        parser: F,
        default: T,
        warnings: &mut Vec<ConfigWarning>,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
    {
        match parser(value) {
            Some(parsed) => parsed,
            None => {
                warnings.push(ConfigWarning {
                    key: self.var_name.to_string(),
                    message: format!(
                        "Invalid {} value '{}' (valid values: {})",
                        self.var_name,
                        value,
                        self.valid_values.join(", ")
                    ),
                    suggestion: suggest(value, self.valid_values),
                });
                default
            }
        }
    }
}

/// Closest candidate within two edits, ignoring exact matches
pub fn suggest(value: &str, candidates: &[&str]) -> Option<String> {
    let input = value.to_lowercase();
    candidates
        .iter()
        .map(|&candidate| (candidate, levenshtein(&input, &candidate.to_lowercase())))
        .min_by_key(|&(_, dist)| dist)
        .filter(|&(_, dist)| (1..=2).contains(&dist))
        .map(|(candidate, _)| candidate.to_string())
}

/// Edit distance over chars, one row at a time
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}
