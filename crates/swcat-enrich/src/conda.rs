//! conda-forge feedstock recipes.
//!
//! Recipes are Jinja-templated YAML. Only the top-level `about:` section is
//! wanted, so templating is stripped rather than rendered: `{{ ... }}`
//! expressions become empty and `{% ... %}` statement lines are dropped.

use crate::{EnrichError, MetadataSource, PackageMetadata};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use swcat_core::config::EnrichmentConfig;

static EXPRESSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{.*?\}\}").expect("static pattern"));

const NAME_PLACEHOLDER: &str = "{name}";

pub struct CondaForgeSource {
    agent: ureq::Agent,
    recipe_url: String,
    source_url: String,
}

impl CondaForgeSource {
    pub fn new(config: &EnrichmentConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            recipe_url: config.recipe_url.clone(),
            source_url: config.source_url.clone(),
        }
    }

    fn get_recipe(&self, name: &str) -> Result<Option<String>, EnrichError> {
        let url = self.recipe_url.replace(NAME_PLACEHOLDER, name);
        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(ureq::Error::Status(status, _)) => {
                return Err(EnrichError::Status {
                    name: name.to_string(),
                    status,
                })
            }
            Err(err) => {
                return Err(EnrichError::Http {
                    name: name.to_string(),
                    source: Box::new(err),
                })
            }
        };
        response
            .into_string()
            .map(Some)
            .map_err(|source| EnrichError::Body {
                name: name.to_string(),
                source,
            })
    }
}

impl MetadataSource for CondaForgeSource {
    fn fetch(&self, name: &str) -> Result<Option<PackageMetadata>, EnrichError> {
        let Some(recipe) = self.get_recipe(name)? else {
            tracing::debug!(name, "no conda-forge feedstock");
            return Ok(None);
        };
        let Some(about) = parse_about(name, &recipe)? else {
            return Ok(None);
        };
        Ok(Some(PackageMetadata {
            name: name.to_string(),
            about,
            source: self.source_url.replace(NAME_PLACEHOLDER, name),
        }))
    }
}

/// Remove Jinja templating from a recipe.
pub fn strip_templating(recipe: &str) -> String {
    recipe
        .lines()
        .filter(|line| !line.contains("{%"))
        .map(|line| EXPRESSION.replace_all(line, ""))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The top-level `about:` section, from its key up to the next top-level key.
pub fn about_section(recipe: &str) -> Option<String> {
    let mut lines = recipe.lines().skip_while(|line| !line.starts_with("about:"));
    let first = lines.next()?;
    let mut section = vec![first];
    section.extend(lines.take_while(|line| !is_top_level_key(line)));
    Some(section.join("\n"))
}

fn is_top_level_key(line: &str) -> bool {
    line.starts_with(|c: char| c.is_ascii_alphabetic()) && line.contains(':')
}

/// Parse a recipe's `about` section into JSON. An absent or empty section
/// yields `None`.
pub fn parse_about(name: &str, recipe: &str) -> Result<Option<serde_json::Value>, EnrichError> {
    let stripped = strip_templating(recipe);
    let Some(section) = about_section(&stripped) else {
        return Ok(None);
    };

    let doc: serde_yaml::Value = serde_yaml::from_str(&section).map_err(|source| EnrichError::Yaml {
        name: name.to_string(),
        source,
    })?;
    let about = match doc.get("about") {
        Some(about) if !is_empty(about) => about,
        _ => return Ok(None),
    };

    serde_json::to_value(about)
        .map(Some)
        .map_err(|source| EnrichError::Convert {
            name: name.to_string(),
            source,
        })
}

fn is_empty(value: &serde_yaml::Value) -> bool {
    match value {
        serde_yaml::Value::Null => true,
        serde_yaml::Value::Mapping(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const RECIPE: &str = r#"{% set name = "numpy" %}
{% set version = "1.26.4" %}

package:
  name: {{ name|lower }}
  version: {{ version }}

source:
  url: https://example.org/numpy-{{ version }}.tar.gz

about:
  home: http://numpy.org/
  license: BSD-3-Clause
  summary: The fundamental package for scientific computing with Python.
  dev_url: https://github.com/numpy/numpy

extra:
  recipe-maintainers:
    - jakirkham
"#;

    #[test]
    fn strips_statements_and_expressions() {
        let out = strip_templating("{% set v = 1 %}\nversion: {{ v }}\nname: x");
        assert_eq!(out, "version: \nname: x");
    }

    #[test]
    fn about_section_stops_at_next_key() {
        let section = about_section(RECIPE).unwrap();
        assert!(section.starts_with("about:"));
        assert!(section.contains("dev_url"));
        assert!(!section.contains("extra"));
    }

    #[test]
    fn parses_about_into_json() {
        let about = parse_about("numpy", RECIPE).unwrap().unwrap();
        assert_eq!(
            about,
            json!({
                "home": "http://numpy.org/",
                "license": "BSD-3-Clause",
                "summary": "The fundamental package for scientific computing with Python.",
                "dev_url": "https://github.com/numpy/numpy",
            })
        );
    }

    #[test]
    fn missing_or_empty_about_is_none() {
        assert_eq!(parse_about("x", "package:\n  name: x\n").unwrap(), None);
        assert_eq!(parse_about("x", "about:\nextra:\n  a: 1\n").unwrap(), None);
    }

    #[test]
    fn malformed_about_is_an_error() {
        let err = parse_about("x", "about:\n  summary: [unclosed\n").unwrap_err();
        assert!(matches!(err, EnrichError::Yaml { .. }));
    }
}
