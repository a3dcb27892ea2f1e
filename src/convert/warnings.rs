//! Advisory warnings for lossy or naive rewrites.
//!
//! Warnings never change the output text and never fail the run; they tell
//! the user which parts of the converted dump deserve manual review.

/// Warning types that can occur during conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertWarning {
    /// An enum(...) column type was collapsed to a fixed-width VARCHAR
    EnumDegraded { columns: usize },
    /// UNSIGNED appears in the input and is passed through unchanged
    UnsignedPassthrough,
    /// Lenient decoding dropped invalid UTF-8 bytes from the input
    InvalidBytesDropped { bytes: usize },
}

impl std::fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertWarning::EnumDegraded { columns } => {
                write!(
                    f,
                    "{} enum column(s) converted to VARCHAR - consider CREATE TYPE ... AS ENUM",
                    columns
                )
            }
            ConvertWarning::UnsignedPassthrough => {
                write!(
                    f,
                    "UNSIGNED modifier passed through unchanged - PostgreSQL integers are signed"
                )
            }
            ConvertWarning::InvalidBytesDropped { bytes } => {
                write!(f, "{} invalid UTF-8 byte(s) dropped while reading input", bytes)
            }
        }
    }
}

/// Collects warnings during conversion, one per kind.
#[derive(Debug, Default)]
pub struct WarningCollector {
    warnings: Vec<ConvertWarning>,
}

impl WarningCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning unless one of the same kind was already recorded.
    pub fn add(&mut self, warning: ConvertWarning) {
        let dup = self
            .warnings
            .iter()
            .any(|w| std::mem::discriminant(w) == std::mem::discriminant(&warning));
        if !dup {
            self.warnings.push(warning);
        }
    }

    pub fn warnings(&self) -> &[ConvertWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicates_by_kind() {
        let mut collector = WarningCollector::new();
        collector.add(ConvertWarning::UnsignedPassthrough);
        collector.add(ConvertWarning::UnsignedPassthrough);
        collector.add(ConvertWarning::EnumDegraded { columns: 3 });

        assert_eq!(collector.count(), 2);
        assert!(collector.has_warnings());
    }

    #[test]
    fn test_display() {
        let warning = ConvertWarning::InvalidBytesDropped { bytes: 7 };
        assert_eq!(
            warning.to_string(),
            "7 invalid UTF-8 byte(s) dropped while reading input"
        );
    }
}
