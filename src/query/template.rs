use crate::error::{ClimateQueryError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `{state}`-style named placeholders in query text.
static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("placeholder regex"));

/// An immutable query template with a declared placeholder set.
///
/// Substitution is textual; templates own the quoting of string-valued
/// placeholders inside the generated SQL. Rendering fails if a declared
/// placeholder has no value or if the rendered text still contains a
/// placeholder token, so a malformed template can never reach the remote
/// service.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    text: &'static str,
    placeholders: &'static [&'static str],
}

impl QueryTemplate {
    pub const fn new(text: &'static str, placeholders: &'static [&'static str]) -> Self {
        Self { text, placeholders }
    }

    pub fn text(&self) -> &'static str {
        self.text
    }

    pub fn placeholders(&self) -> &'static [&'static str] {
        self.placeholders
    }

    /// Substitute every declared placeholder and verify nothing is left
    /// unresolved. Bindings not declared by the template are ignored.
    pub fn render(&self, bindings: &[(&str, String)]) -> Result<String> {
        let mut rendered = self.text.to_string();
        for placeholder in self.placeholders {
            let value = bindings
                .iter()
                .find(|(key, _)| key == placeholder)
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| ClimateQueryError::MissingPlaceholder {
                    placeholder: placeholder.to_string(),
                })?;
            rendered = rendered.replace(&format!("{{{placeholder}}}"), value);
        }

        let leftover: Vec<String> = PLACEHOLDER_RE
            .captures_iter(&rendered)
            .map(|cap| cap[1].to_string())
            .collect();
        if !leftover.is_empty() {
            return Err(ClimateQueryError::UnresolvedPlaceholders {
                placeholders: leftover,
            });
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SAMPLE: QueryTemplate = QueryTemplate::new(
        "SELECT * FROM `t.gsod{year}` WHERE state = '{state}'",
        &["state", "year"],
    );

    #[test]
    fn render_substitutes_every_occurrence() {
        let sql = SAMPLE
            .render(&[("state", "CA".to_string()), ("year", "2015".to_string())])
            .unwrap();
        assert_eq!(sql, "SELECT * FROM `t.gsod2015` WHERE state = 'CA'");
    }

    #[test]
    fn missing_binding_is_a_construction_error() {
        let err = SAMPLE
            .render(&[("state", "CA".to_string())])
            .unwrap_err();
        assert_matches!(
            err,
            ClimateQueryError::MissingPlaceholder { placeholder } if placeholder == "year"
        );
    }

    #[test]
    fn undeclared_placeholder_in_text_is_caught_after_rendering() {
        const BAD: QueryTemplate =
            QueryTemplate::new("SELECT {state} FROM t WHERE y = {typo}", &["state"]);
        let err = BAD.render(&[("state", "CA".to_string())]).unwrap_err();
        assert_matches!(
            err,
            ClimateQueryError::UnresolvedPlaceholders { placeholders } if placeholders == vec!["typo".to_string()]
        );
    }

    #[test]
    fn extra_bindings_are_ignored() {
        let sql = SAMPLE
            .render(&[
                ("state", "NY".to_string()),
                ("year", "1999".to_string()),
                ("month", "7".to_string()),
            ])
            .unwrap();
        assert!(sql.contains("'NY'"));
        assert!(sql.contains("gsod1999"));
    }
}
