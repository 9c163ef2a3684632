use std::collections::HashSet;
use std::path::Path;

use finclass_core::LabelEncoder;
use serde::Deserialize;

use crate::{invalid, read_json, ArtifactError};

/// Label encoder artifact: `{"classes": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassEncoder {
    classes: Vec<String>,
}

impl ClassEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        let encoder = Self { classes };
        encoder.check()?;
        Ok(encoder)
    }

    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let encoder: Self = read_json(path)?;
        encoder.check().map_err(|reason| invalid(path, reason))?;
        Ok(encoder)
    }

    fn check(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("no classes".into());
        }

        let mut seen = HashSet::new();
        match self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            Some(dup) => Err(format!("duplicate class '{dup}'")),
            None => Ok(()),
        }
    }
}

impl LabelEncoder for ClassEncoder {
    fn classes(&self) -> &[String] {
        &self.classes
    }
}
