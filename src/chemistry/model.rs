use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::chemistry::constants::group;
use crate::error::PolyampholyteError;

/// One row of the group property table.
///
/// Nullable columns are `None` when the value is not defined for the group,
/// e.g. non-ionizable side chains have neither a charge indicator nor pKa values.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    pub molar_mass: f64,
    // molar mass minus the water condensed upon chain formation
    pub molar_mass_residue: Option<f64>,
    // nitrogen mass fraction of the residue
    pub nitrogen_content_residue: Option<f64>,
    // +1 for groups protonated to a positive charge, -1 for groups deprotonated to a negative charge
    pub charge_indicator: Option<f64>,
    pub pka_bjellqvist: Option<f64>,
    pub pka_ipc_protein: Option<f64>,
    pub pka_emboss: Option<f64>,
}

impl GroupRecord {
    pub fn pka(&self, scheme: PkaScheme) -> Option<f64> {
        match scheme {
            PkaScheme::Bjellqvist => self.pka_bjellqvist,
            PkaScheme::IpcProtein => self.pka_ipc_protein,
            PkaScheme::Emboss => self.pka_emboss,
        }
    }

    pub fn is_terminus(&self) -> bool {
        self.id == group::N_TERM || self.id == group::C_TERM
    }

    /// Every numeric column that holds a value, paired with its column name.
    pub fn numeric_values(&self) -> impl Iterator<Item = (&'static str, f64)> {
        let optional = [
            ("molar_mass_residue", self.molar_mass_residue),
            ("nitrogen_content_residue", self.nitrogen_content_residue),
            ("charge_indicator", self.charge_indicator),
            ("pka_bjellqvist", self.pka_bjellqvist),
            ("pka_ipc_protein", self.pka_ipc_protein),
            ("pka_emboss", self.pka_emboss),
        ];

        std::iter::once(("molar_mass", self.molar_mass))
            .chain(optional.into_iter().filter_map(|(column, value)| value.map(|v| (column, v))))
    }

    /// The one-letter code of the group, only defined for single-character ids.
    pub fn code1(&self) -> Option<char> {
        let mut chars = self.id.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    pub fn is_ionizable(&self) -> bool {
        PkaScheme::ALL.iter().any(|scheme| self.pka(*scheme).is_some())
    }
}

/// Named reference tables of pKa values.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub enum PkaScheme {
    // Bjellqvist et al. (ExPASy Compute pI/Mw)
    #[default]
    Bjellqvist,
    // Kozlowski, IPC_protein
    IpcProtein,
    Emboss,
}

impl PkaScheme {
    pub const ALL: [PkaScheme; 3] = [PkaScheme::Bjellqvist, PkaScheme::IpcProtein, PkaScheme::Emboss];

    pub fn column_name(&self) -> &'static str {
        match self {
            PkaScheme::Bjellqvist => "pka_bjellqvist",
            PkaScheme::IpcProtein => "pka_ipc_protein",
            PkaScheme::Emboss => "pka_emboss",
        }
    }
}

impl FromStr for PkaScheme {
    type Err = PolyampholyteError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let lowered = name.trim().to_ascii_lowercase();
        let short_name = lowered.strip_prefix("pka_").unwrap_or(&lowered);

        match short_name {
            "bjellqvist"             => Ok(PkaScheme::Bjellqvist),
            "ipc_protein" | "ipc"    => Ok(PkaScheme::IpcProtein),
            "emboss"                 => Ok(PkaScheme::Emboss),
            _                        => Err(PolyampholyteError::UnknownPkaScheme(name.to_string()))
        }
    }
}

impl std::fmt::Display for PkaScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}
