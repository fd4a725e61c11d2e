use itertools::{izip, Itertools};

use crate::chemistry::model::PkaScheme;
use crate::chemistry::table::GroupTable;

/// Ionizable groups selected for one pKa scheme, stored column-wise so that
/// charge evaluations don't have to go back to the table.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ActiveGroups {
    pub ids: Vec<String>,
    pub charge_indicator: Vec<f64>,
    pub abundance_norm: Vec<f64>,
    pub pka: Vec<f64>,
}

impl ActiveGroups {

    /// Keeps the rows having a pKa value under `scheme`.
    pub fn select(table: &GroupTable, abundance_norm: &[f64], scheme: PkaScheme) -> ActiveGroups {
        let mut active = ActiveGroups::default();

        for (group, ab) in table.groups.iter().zip(abundance_norm) {
            // charge_indicator is guaranteed by the table when a pKa is defined
            if let (Some(pka), Some(ci)) = (group.pka(scheme), group.charge_indicator) {
                active.ids.push(group.id.to_owned());
                active.charge_indicator.push(ci);
                active.abundance_norm.push(*ab);
                active.pka.push(pka);
            }
        }

        active
    }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Net charge per residue at the given pH (Henderson-Hasselbalch).
    #[allow(non_snake_case)]
    pub fn charge_at(&self, pH: f64) -> f64 {
        let mut charge = 0.0;
        for (ci, ab, pka) in izip!(&self.charge_indicator, &self.abundance_norm, &self.pka) {
            charge += ci * ab / (1.0 + 10f64.powf(ci * (pH - pka)));
        }

        charge
    }

    pub fn charges_at(&self, ph_values: &[f64]) -> Vec<f64> {
        ph_values.iter().map(|ph| self.charge_at(*ph)).collect()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct ChargeCurve {
    pub ph: Vec<f64>,
    pub charge: Vec<f64>,
}

impl ChargeCurve {
    pub fn len(&self) -> usize { self.ph.len() }

    pub fn is_empty(&self) -> bool { self.ph.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ph.iter().copied().zip_eq(self.charge.iter().copied())
    }
}

/// `n_points` equally spaced values from `lo` to `hi`, both included.
pub fn linspace(lo: f64, hi: f64, n_points: usize) -> Vec<f64> {
    if n_points == 1 {
        return vec![lo];
    }

    let step = (hi - lo) / (n_points - 1) as f64;
    (0..n_points)
        .map(|i| if i == n_points - 1 { hi } else { lo + i as f64 * step })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::table::AMINO_ACID_GROUP_TABLE;

    fn norm_for(pairs: &[(&str, f64)]) -> Vec<f64> {
        let table = &*AMINO_ACID_GROUP_TABLE;
        let mut norm = vec![0.0; table.len()];
        for (id, ab) in pairs {
            norm[table.index_of(id).unwrap()] = *ab;
        }
        norm
    }

    #[test]
    fn select_skips_non_ionizable_groups() {
        let norm = norm_for(&[("G", 0.5), ("K", 0.5)]);
        let active = ActiveGroups::select(&AMINO_ACID_GROUP_TABLE, &norm, PkaScheme::Bjellqvist);

        assert!(!active.ids.iter().any(|id| id == "G"));
        // D E C Y H K R Hyl N_term C_term
        assert_eq!(active.len(), 10);
        assert_eq!(active.ids.iter().position(|id| id == "K").map(|i| active.abundance_norm[i]), Some(0.5));
    }

    #[test]
    fn half_protonated_at_pka() {
        let norm = norm_for(&[("K", 1.0)]);
        let active = ActiveGroups::select(&AMINO_ACID_GROUP_TABLE, &norm, PkaScheme::Emboss);
        assert!((active.charge_at(10.8) - 0.5).abs() < 1e-12);

        let norm = norm_for(&[("D", 1.0)]);
        let active = ActiveGroups::select(&AMINO_ACID_GROUP_TABLE, &norm, PkaScheme::Bjellqvist);
        assert!((active.charge_at(4.05) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn charge_limits() {
        let norm = norm_for(&[("K", 0.25), ("E", 0.75)]);
        let active = ActiveGroups::select(&AMINO_ACID_GROUP_TABLE, &norm, PkaScheme::Bjellqvist);
        assert!((active.charge_at(-2.0) - 0.25).abs() < 1e-6);
        assert!((active.charge_at(16.0) + 0.75).abs() < 1e-6);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let values = linspace(0.0, 14.0, 100);
        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[99], 14.0);
        assert!(values.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(linspace(3.0, 3.0, 4), vec![3.0; 4]);
    }

    #[test]
    fn charges_match_scalar_evaluation() {
        let norm = norm_for(&[("K", 0.3), ("D", 0.2), ("H", 0.1), ("Y", 0.4)]);
        let active = ActiveGroups::select(&AMINO_ACID_GROUP_TABLE, &norm, PkaScheme::IpcProtein);
        let ph_values = linspace(1.0, 13.0, 25);

        for (ph, charge) in ph_values.iter().zip(active.charges_at(&ph_values)) {
            assert_eq!(charge, active.charge_at(*ph));
        }
    }
}
