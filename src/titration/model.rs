use log::debug;
use std::str::FromStr;

use crate::chemistry::composition::{parse_aa_composition, SequenceParsing};
use crate::chemistry::constants::DEFAULT_CURVE_POINTS;
use crate::chemistry::mass_calc::*;
use crate::chemistry::model::PkaScheme;
use crate::chemistry::table::{GroupTable, AMINO_ACID_GROUP_TABLE};
use crate::error::{PolyampholyteError, Result};
use crate::titration::charge::{linspace, ActiveGroups, ChargeCurve};
use crate::titration::root::{brentq, BrentSettings};

/// Kind of polyampholyte, it defines which composition inputs are understood.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum Mode {
    #[default]
    Protein,
}

impl FromStr for Mode {
    type Err = PolyampholyteError;

    fn from_str(mode: &str) -> std::result::Result<Self, Self::Err> {
        match mode {
            "protein" => Ok(Mode::Protein),
            _ => Err(PolyampholyteError::InvalidInput(format!("unknown mode '{}' for IEP calculation", mode)))
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Protein => write!(f, "protein"),
        }
    }
}

/// Composition of a protein, given either as group abundances or as a residue sequence.
#[derive(Clone, PartialEq, Debug)]
pub enum ProteinInput {
    /// Absolute or relative amounts in table order, missing trailing entries are zero.
    Abundance(Vec<f64>),
    /// One-letter codes of a single chain.
    Sequence { sequence: String, parsing: SequenceParsing },
}

impl ProteinInput {
    pub fn abundance(abundance: Vec<f64>) -> ProteinInput {
        ProteinInput::Abundance(abundance)
    }

    pub fn sequence(sequence: &str) -> ProteinInput {
        ProteinInput::Sequence { sequence: sequence.to_string(), parsing: SequenceParsing::Strict }
    }

    /// Resolves optional inputs, exactly one of them has to be provided.
    pub fn from_parts(abundance: Option<Vec<f64>>, sequence: Option<String>, parsing: SequenceParsing) -> Result<ProteinInput> {
        match (abundance, sequence) {
            (Some(abundance), None) => Ok(ProteinInput::Abundance(abundance)),
            (None, Some(sequence)) => Ok(ProteinInput::Sequence { sequence, parsing }),
            (None, None) => Err(PolyampholyteError::InvalidInput("missing input for protein composition".to_string())),
            (Some(_), Some(_)) => Err(PolyampholyteError::InvalidInput("abundance and sequence are mutually exclusive".to_string())),
        }
    }
}

/// A polyampholyte such as a protein, defined by the abundances of its
/// ionizable and non-ionizable groups.
///
/// Abundances are derived once at construction. Only the pKa scheme can be
/// changed afterwards, which re-selects the groups taking part in charge
/// calculations.
#[derive(Clone, PartialEq, Debug)]
pub struct Polyampholyte<'t> {
    table: &'t GroupTable,
    mode: Mode,
    abundance_input: Vec<f64>,
    abundance_norm: Vec<f64>,
    mass_percent: Vec<f64>,
    pka_scheme: PkaScheme,
    active_groups: ActiveGroups,
    sequence: Option<String>,
    residue_count: Option<usize>,
    solver_settings: BrentSettings,
}

impl Polyampholyte<'static> {
    pub fn new(mode: Mode, input: ProteinInput, pka_scheme: PkaScheme) -> Result<Polyampholyte<'static>> {
        Polyampholyte::with_table(&AMINO_ACID_GROUP_TABLE, mode, input, pka_scheme)
    }

    pub fn from_sequence(sequence: &str) -> Result<Polyampholyte<'static>> {
        Polyampholyte::new(Mode::Protein, ProteinInput::sequence(sequence), PkaScheme::default())
    }

    pub fn from_abundance(abundance: Vec<f64>) -> Result<Polyampholyte<'static>> {
        Polyampholyte::new(Mode::Protein, ProteinInput::abundance(abundance), PkaScheme::default())
    }
}

impl<'t> Polyampholyte<'t> {
    pub fn with_table(
        table: &'t GroupTable,
        mode: Mode,
        input: ProteinInput,
        pka_scheme: PkaScheme,
    ) -> Result<Polyampholyte<'t>> {

        let (abundance_input, sequence, residue_count) = match (mode, input) {
            (Mode::Protein, ProteinInput::Abundance(abundance)) => {
                (Self::_pad_abundance(abundance, table.len())?, None, None)
            }
            (Mode::Protein, ProteinInput::Sequence { sequence, parsing }) => {
                let composition = parse_aa_composition(&sequence, table, parsing)?;
                (composition.abundance, Some(sequence), Some(composition.residue_count))
            }
        };

        // Termini are left out of the denominator, their normalized abundance
        // is an amount per residue.
        let residue_sum: f64 = abundance_input[..table.residue_type_count()].iter().sum();
        if residue_sum <= 0.0 {
            return Err(PolyampholyteError::InvalidInput("residue abundances must not all be zero".to_string()));
        }
        let abundance_norm: Vec<f64> = abundance_input.iter().map(|ab| ab / residue_sum).collect();

        let masses: Vec<f64> = abundance_input.iter().zip(&table.groups).map(|(ab, group)| ab * group.molar_mass).collect();
        let total_mass: f64 = masses.iter().sum();
        let mass_percent = masses.iter().map(|mass| mass / total_mass).collect();

        let active_groups = ActiveGroups::select(table, &abundance_norm, pka_scheme);

        debug!(
            "built {} polyampholyte from {} with {} active groups under {}",
            mode,
            if sequence.is_some() { "sequence" } else { "abundances" },
            active_groups.len(),
            pka_scheme
        );

        Ok(Polyampholyte {
            table: table,
            mode: mode,
            abundance_input: abundance_input,
            abundance_norm: abundance_norm,
            mass_percent: mass_percent,
            pka_scheme: pka_scheme,
            active_groups: active_groups,
            sequence: sequence,
            residue_count: residue_count,
            solver_settings: BrentSettings::default(),
        })
    }

    fn _pad_abundance(mut abundance: Vec<f64>, n_groups: usize) -> Result<Vec<f64>> {
        if abundance.len() > n_groups {
            return Err(PolyampholyteError::InvalidInput(
                format!("{} abundances given but the table only has {} groups", abundance.len(), n_groups)
            ));
        }
        if let Some(bad) = abundance.iter().find(|ab| !ab.is_finite() || **ab < 0.0) {
            return Err(PolyampholyteError::InvalidInput(format!("abundance {} is not a finite positive number", bad)));
        }

        abundance.resize(n_groups, 0.0);

        Ok(abundance)
    }

    pub fn mode(&self) -> Mode { self.mode }

    pub fn table(&self) -> &'t GroupTable { self.table }

    pub fn abundance_input(&self) -> &[f64] { &self.abundance_input }

    pub fn abundance_norm(&self) -> &[f64] { &self.abundance_norm }

    pub fn mass_percent(&self) -> &[f64] { &self.mass_percent }

    pub fn sequence(&self) -> Option<&str> { self.sequence.as_deref() }

    pub fn residue_count(&self) -> Option<usize> { self.residue_count }

    pub fn pka_scheme(&self) -> PkaScheme { self.pka_scheme }

    /// Ids of the groups taking part in charge calculations under the current pKa scheme.
    pub fn active_groups(&self) -> &[String] { &self.active_groups.ids }

    /// Switches the pKa table used by subsequent charge and IEP calculations.
    /// Abundances are not re-derived.
    pub fn set_pka_scheme(&mut self, pka_scheme: PkaScheme) {
        if pka_scheme == self.pka_scheme {
            return;
        }

        self.active_groups = ActiveGroups::select(self.table, &self.abundance_norm, pka_scheme);
        self.pka_scheme = pka_scheme;

        debug!("switched to {} with {} active groups", pka_scheme, self.active_groups.len());
    }

    /// Net charge per residue at the given pH.
    #[allow(non_snake_case)]
    pub fn charge(&self, pH: f64) -> f64 {
        self.active_groups.charge_at(pH)
    }

    /// Samples the charge on `points` equally spaced pH values of `ph_range`.
    pub fn charge_curve(&self, ph_range: (f64, f64), points: usize) -> Result<ChargeCurve> {
        _check_ph_range(ph_range)?;
        if points < 2 {
            return Err(PolyampholyteError::InvalidRange {
                lo: ph_range.0,
                hi: ph_range.1,
                reason: format!("at least 2 points are required, got {}", points),
            });
        }

        let ph = linspace(ph_range.0, ph_range.1, points);
        let charge = self.active_groups.charges_at(&ph);

        Ok(ChargeCurve { ph, charge })
    }

    pub fn default_charge_curve(&self, ph_range: (f64, f64)) -> Result<ChargeCurve> {
        self.charge_curve(ph_range, DEFAULT_CURVE_POINTS)
    }

    /// pH of zero net charge within `ph_range`.
    ///
    /// Returns `f64::NAN` when the charge doesn't change sign over the range,
    /// which is common for strongly acidic or basic molecules.
    pub fn isoelectric_point(&self, ph_range: (f64, f64)) -> Result<f64> {
        _check_ph_range(ph_range)?;

        let iep = brentq(|ph| self.charge(ph), ph_range.0, ph_range.1, &self.solver_settings);
        if iep.is_none() {
            debug!("no isoelectric point found in [{}, {}]", ph_range.0, ph_range.1);
        }

        Ok(iep.unwrap_or(f64::NAN))
    }

    /// Molar mass of the chain, only defined when the sequence is known.
    pub fn molar_mass(&self) -> Result<f64> {
        if self.sequence.is_none() {
            return Err(PolyampholyteError::MissingSequence);
        }

        Ok(calc_molar_mass(&self.abundance_input, self.table))
    }

    pub fn mean_residue_molar_mass(&self) -> f64 {
        calc_mean_residue_molar_mass(&self.abundance_norm, self.table, self.sequence.is_some())
    }

    pub fn nitrogen_content(&self) -> f64 {
        calc_nitrogen_content(&self.abundance_norm, self.table)
    }
}

fn _check_ph_range(ph_range: (f64, f64)) -> Result<()> {
    let (lo, hi) = ph_range;

    let reason = if !lo.is_finite() || !hi.is_finite() {
        "bounds must be finite"
    } else if lo > hi {
        "lower bound exceeds upper bound"
    } else {
        return Ok(());
    };

    Err(PolyampholyteError::InvalidRange { lo, hi, reason: reason.to_string() })
}
