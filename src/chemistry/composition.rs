use log::warn;

use crate::chemistry::table::GroupTable;
use crate::error::{PolyampholyteError, Result};

/// Policy for characters of a sequence that are not one-letter residue codes of the table.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum SequenceParsing {
    /// Fail with `UnrecognizedResidue` on the first unknown character.
    #[default]
    Strict,
    /// Skip unknown characters, they are then missing from the composition.
    Lenient,
}

#[derive(Clone, PartialEq, Debug)]
pub struct SequenceComposition {
    // one entry per table row, termini set to one
    pub abundance: Vec<f64>,
    // number of non-whitespace characters of the sequence
    pub residue_count: usize,
    pub skipped_count: usize,
}

/// Counts residues of a single-chain sequence in table order.
///
/// Matching is case-sensitive. Whitespace is ignored so that sequences wrapped
/// over several lines can be passed as is. Extension slots without a one-letter
/// code keep a zero abundance and each terminus is counted once.
pub fn parse_aa_composition(sequence: &str, table: &GroupTable, parsing: SequenceParsing) -> Result<SequenceComposition> {

    let mut abundance = vec![0.0; table.len()];
    let mut residue_count = 0;
    let mut skipped_count = 0;

    let seq_chars = sequence.chars().filter(|c| !c.is_whitespace());
    for (position, aa) in seq_chars.enumerate() {
        residue_count += 1;

        match (table.index_of_code1(aa), parsing) {
            (Some(idx), _) if idx < table.residue_type_count() => abundance[idx] += 1.0,
            (_, SequenceParsing::Strict) => {
                return Err(PolyampholyteError::UnrecognizedResidue { residue: aa, position })
            }
            (_, SequenceParsing::Lenient) => skipped_count += 1,
        }
    }

    if residue_count == skipped_count {
        return Err(PolyampholyteError::InvalidInput("sequence contains no recognized residues".to_string()));
    }

    if skipped_count > 0 {
        warn!("{} of {} characters of the sequence are not residue codes and were skipped", skipped_count, residue_count);
    }

    // one N-terminus and one C-terminus per chain
    abundance[table.residue_type_count()..].fill(1.0);

    Ok(SequenceComposition {
        abundance: abundance,
        residue_count: residue_count,
        skipped_count: skipped_count,
    })
}
