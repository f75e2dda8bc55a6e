use thiserror::Error;

/// Validation failures produced by the field pipeline.
///
/// Every variant is a local, per-record rejection; nothing here is
/// process-fatal. Structural (stage-one) failures use [`FieldError::Shape`],
/// semantic parse failures carry the offending raw value, and
/// [`FieldError::InvariantViolation`] flags data-quality breaks that must be
/// surfaced rather than silently corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Raw input does not match the structural shape expected for its field.
    #[error("{field} format invalid: expected {expected}")]
    Shape {
        field: &'static str,
        expected: &'static str,
    },

    /// Era-style date passed the shape check but is not a real calendar date.
    #[error("invalid date {raw:?}: expected yyyy年mm月dd日 denoting a real calendar day")]
    DateFormat { raw: String },

    /// Wage text does not match the comma-grouped yen-range grammar.
    #[error("invalid wage {raw:?}: expected a range like 200,000円〜300,000円")]
    WageFormat { raw: String },

    /// Present working-hours text does not match the time-range grammar.
    #[error("invalid working hours {raw:?}: expected a range like 9時00分〜18時00分")]
    WorkingHoursFormat { raw: String },

    /// Employee-count text contains no digit run.
    #[error("no numeric value found in {raw:?}")]
    NoNumericValue { raw: String },

    /// A parsed value violates a cross-field invariant (e.g. wageMin > wageMax).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl FieldError {
    /// True for stage-one structural rejections, false for semantic ones.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, FieldError::Shape { .. })
    }

    /// The raw input that triggered a semantic parse failure, if any.
    pub fn raw(&self) -> Option<&str> {
        match self {
            FieldError::DateFormat { raw }
            | FieldError::WageFormat { raw }
            | FieldError::WorkingHoursFormat { raw }
            | FieldError::NoNumericValue { raw } => Some(raw),
            _ => None,
        }
    }
}
