//! The fixed, ordered list of features the model was trained on.

use std::collections::HashSet;

use crate::error::SchemaError;

/// `(internal_id, external_name)` pairs in training order.
pub const FINANCIAL_FEATURES: [(&str, &str); 15] = [
    ("Gaji", "Gaji"),
    ("Tabungan_Lama", "Tabungan Lama"),
    ("Investasi", "Investasi"),
    ("Pemasukan_Lainnya", "Pemasukan Lainnya"),
    ("Bahan_Pokok", "Bahan Pokok"),
    ("Protein_Gizi", "Protein & Gizi Tambahan"),
    ("Tempat_Tinggal", "Tempat Tinggal"),
    ("Sandang", "Sandang"),
    ("Konsumsi_Praktis", "Konsumsi Praktis"),
    ("Barang_Jasa_Sekunder", "Barang & Jasa Sekunder"),
    ("Pengeluaran_Tidak_Esensial", "Pengeluaran Tidak Esensial"),
    ("Pajak", "Pajak"),
    ("Asuransi", "Asuransi"),
    ("Sosial_Budaya", "Sosial & Budaya"),
    ("Tabungan_Investasi", "Tabungan / Investasi"),
];

/// A single schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSpec {
    /// Identifier used by the training pipeline.
    pub internal_id: String,
    /// Human-readable name clients send.
    pub external_name: String,
    /// Index in the canonical vector.
    pub position: usize,
}

impl FeatureSpec {
    pub fn new(
        position: usize,
        internal_id: impl Into<String>,
        external_name: impl Into<String>,
    ) -> Self {
        Self {
            internal_id: internal_id.into(),
            external_name: external_name.into(),
            position,
        }
    }
}

/// Ordered, immutable feature schema.
///
/// Entries are stored sorted by `position`, and positions are exactly
/// `0..len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    entries: Vec<FeatureSpec>,
}

impl FeatureSchema {
    /// Builds a schema, checking positions and name uniqueness.
    ///
    /// An internal identifier may equal its own external name, but no name
    /// may resolve to two different entries.
    pub fn new(mut entries: Vec<FeatureSpec>) -> Result<Self, SchemaError> {
        if entries.is_empty() {
            return Err(SchemaError::Empty);
        }

        entries.sort_by_key(|e| e.position);
        if let Some(gap) = entries.iter().enumerate().find(|(i, e)| e.position != *i) {
            return Err(SchemaError::NonContiguous(gap.0));
        }

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.external_name.as_str()) {
                return Err(SchemaError::DuplicateName(entry.external_name.clone()));
            }
        }
        for entry in &entries {
            if entry.internal_id == entry.external_name {
                continue;
            }
            if !seen.insert(entry.internal_id.as_str()) {
                return Err(SchemaError::DuplicateName(entry.internal_id.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// The fifteen-feature financial behavior schema.
    pub fn financial() -> Self {
        let entries = FINANCIAL_FEATURES
            .iter()
            .enumerate()
            .map(|(position, (internal_id, external_name))| {
                FeatureSpec::new(position, *internal_id, *external_name)
            })
            .collect();

        Self { entries }
    }

    /// Entries in position order.
    pub fn entries(&self) -> &[FeatureSpec] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn external_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.external_name.as_str())
    }
}
