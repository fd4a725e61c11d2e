use thiserror::Error;

pub type Result<T> = std::result::Result<T, PolyampholyteError>;

#[derive(Debug, Error)]
pub enum PolyampholyteError {
    /// Unsupported mode or malformed composition input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// pH range with non-finite or reversed bounds, or too few curve points.
    #[error("invalid pH range [{lo}, {hi}]: {reason}")]
    InvalidRange { lo: f64, hi: f64, reason: String },

    /// Sequence-only query on a molecule built from abundances.
    #[error("amino acid sequence is not known, molar mass requires a sequence-based polyampholyte")]
    MissingSequence,

    /// pKa scheme name that matches no table column.
    #[error("unknown pKa scheme '{0}'")]
    UnknownPkaScheme(String),

    /// Sequence character without a group, only raised by strict parsing.
    #[error("unrecognized residue '{residue}' at position {position}")]
    UnrecognizedResidue { residue: char, position: usize },

    /// Group property rows violating the table layout or value constraints.
    #[error("invalid group property table: {0}")]
    InvalidTable(String),

    /// CSV source that can't be opened or deserialized.
    #[error("can't read group property table")]
    TableIo(#[from] csv::Error),
}
