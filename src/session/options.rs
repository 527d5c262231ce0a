use std::fmt;

use super::types::ReturnElements;

/// WITSML `OptionsIn` request options (`key=value;key=value`)
///
/// Keys keep their insertion order so a rewritten option string stays
/// recognisable next to the one the user typed. A key given without `=`
/// is written back the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsIn {
    entries: Vec<(String, Option<String>)>,
}

impl OptionsIn {
    /// Parse an option string; empty segments are ignored
    pub fn parse(text: &str) -> Self {
        let entries = text
            .split(';')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once('=') {
                Some((key, value)) => (key.trim().to_string(), Some(value.trim().to_string())),
                None => (segment.to_string(), None),
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or_default())
    }

    /// Set a value, replacing an existing entry in place
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = Some(value.to_string()),
            None => self.entries.push((key.to_string(), Some(value.to_string()))),
        }
    }

    pub fn return_elements(&self) -> Option<ReturnElements> {
        self.get(ReturnElements::OPTION_KEY)
            .and_then(ReturnElements::parse)
    }

    pub fn with_return_elements(mut self, value: ReturnElements) -> Self {
        self.set(ReturnElements::OPTION_KEY, value.as_str());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for OptionsIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            match value {
                Some(value) => write!(f, "{}={}", key, value)?,
                None => write!(f, "{}", key)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
