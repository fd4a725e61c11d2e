
// Number of chain termini rows closing the group property table (N_term, C_term)
pub const NUM_TERMINI: usize = 2;

// Default pH window used for charge curves and isoelectric point searches
pub const DEFAULT_PH_RANGE: (f64, f64) = (0.0, 14.0);
pub const DEFAULT_CURVE_POINTS: usize = 100;

pub mod group {
    pub const N_TERM: &str = "N_term";
    pub const C_TERM: &str = "C_term";
    pub const HYP: &str = "Hyp";
    pub const HYL: &str = "Hyl";
}

// Table order of the standard residues, this is also the order of abundance vectors
pub const STANDARD_RESIDUE_ORDER: [char; 20] = [
    'D', 'N', 'T', 'S', 'E', 'Q', 'G', 'A', 'C', 'V',
    'M', 'I', 'L', 'Y', 'F', 'H', 'K', 'R', 'P', 'W',
];
