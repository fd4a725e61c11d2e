use crate::chemistry::model::*;
use crate::chemistry::constants::{group, NUM_TERMINI};
use crate::error::{PolyampholyteError, Result};

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::path::Path;

macro_rules! table_bail {
    ($($arg:tt)*) => {
        return Err(PolyampholyteError::InvalidTable(format!($($arg)*)))
    }
}

/// Immutable table of ionizable/residue group properties.
///
/// Row order defines the position of each group in abundance vectors. Residue
/// types come first and the two chain termini (`N_term`, `C_term`) close the table.
///
/// Caveat: normalized abundances divide every row, termini included, by the sum
/// over residue-type rows only. For sequence-based molecules the normalized
/// abundances over all rows therefore add up to slightly more than one, which
/// matters most for short peptides.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct GroupTable {
    pub groups: Vec<GroupRecord>,
    pub group_index_by_id: HashMap<String, usize>,
    pub group_index_by_code1: HashMap<char, usize>,
}

impl GroupTable {
    pub fn new(
        groups: Vec<GroupRecord>,
    ) -> Result<GroupTable> {

        if groups.len() <= NUM_TERMINI { table_bail!("groups must contain residues and both termini") }

        let n_groups = groups.len();
        let mut group_index_by_id = HashMap::with_capacity(n_groups);
        let mut group_index_by_code1 = HashMap::with_capacity(n_groups);

        for (idx, record) in groups.iter().enumerate() {
            if record.id.is_empty() { table_bail!("group #{} has an empty id", idx) }
            for (column, value) in record.numeric_values() {
                if !value.is_finite() { table_bail!("{} of '{}' must be a finite number, got {}", column, record.id, value) }
            }
            if record.molar_mass <= 0.0 { table_bail!("molar_mass of '{}' must be a strictly positive number", record.id) }
            if let Some(mass) = record.molar_mass_residue {
                if mass <= 0.0 { table_bail!("molar_mass_residue of '{}' must be a strictly positive number", record.id) }
            }
            if let Some(n_content) = record.nitrogen_content_residue {
                if !(0.0..=1.0).contains(&n_content) { table_bail!("nitrogen_content_residue of '{}' must be a mass fraction", record.id) }
            }

            match record.charge_indicator {
                Some(ci) if ci != 1.0 && ci != -1.0 => table_bail!("charge_indicator of '{}' must be +1 or -1", record.id),
                None if record.is_ionizable() => table_bail!("'{}' has pKa values but no charge_indicator", record.id),
                _ => {}
            }

            if record.is_terminus() != (idx >= n_groups - NUM_TERMINI) {
                table_bail!("'{}' is misplaced, termini must close the table", record.id)
            }

            if group_index_by_id.insert(record.id.to_owned(), idx).is_some() {
                table_bail!("groups contains duplicated entries for '{}'", record.id)
            }
            if let Some(code1) = record.code1() {
                group_index_by_code1.insert(code1, idx);
            }
        }

        if groups[n_groups - 2].id != group::N_TERM {
            table_bail!("the last two groups must be '{}' and '{}'", group::N_TERM, group::C_TERM)
        }

        Ok(GroupTable {
            groups: groups,
            group_index_by_id: group_index_by_id,
            group_index_by_code1: group_index_by_code1,
        })
    }

    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<GroupTable> {
        let csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        GroupTable::from_csv_records(csv_reader)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<GroupTable> {
        let csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        GroupTable::from_csv_records(csv_reader)
    }

    fn from_csv_records<R: std::io::Read>(mut csv_reader: csv::Reader<R>) -> Result<GroupTable> {
        let groups = csv_reader.deserialize::<GroupRecord>().collect::<std::result::Result<Vec<_>, _>>()?;
        GroupTable::new(groups)
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// Number of residue-type rows, i.e. all rows except the termini.
    pub fn residue_type_count(&self) -> usize { self.groups.len() - NUM_TERMINI }

    pub fn residue_types(&self) -> &[GroupRecord] { &self.groups[..self.residue_type_count()] }

    pub fn termini(&self) -> &[GroupRecord] { &self.groups[self.residue_type_count()..] }

    pub fn get(&self, id: &str) -> Option<&GroupRecord> {
        self.group_index_by_id.get(id).map(|idx| &self.groups[*idx])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.group_index_by_id.get(id).copied()
    }

    pub fn index_of_code1(&self, code1: char) -> Option<usize> {
        self.group_index_by_code1.get(&code1).copied()
    }
}

const GROUP_PROPERTIES_CSV: &str = include_str!("../../data/group_properties.csv");

// Sources :
// - Bjellqvist et al., Electrophoresis 1993, 14, 1023-1031 (ExPASy Compute pI/Mw)
// - Kozlowski, Biol. Direct 2016, 11, 55 (IPC_protein)
// - EMBOSS iep, https://emboss.sourceforge.net
lazy_static! {
    pub static ref AMINO_ACID_GROUP_TABLE: GroupTable = GroupTable::from_csv_reader(
        GROUP_PROPERTIES_CSV.as_bytes()
    ).unwrap();
}
