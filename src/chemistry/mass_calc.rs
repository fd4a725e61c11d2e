use crate::chemistry::model::GroupRecord;
use crate::chemistry::table::GroupTable;

/// Absolute molar mass of a chain: residue masses plus the termini (H and OH).
pub fn calc_molar_mass(abundance_input: &[f64], table: &GroupTable) -> f64 {
    _calc_weighted_sum(abundance_input, &table.groups, |group| group.molar_mass_residue)
}

/// Mean molar mass per residue.
///
/// Termini are only taken into account (with their free molar mass) when the
/// chain is known, otherwise the result is the plain residue average.
pub fn calc_mean_residue_molar_mass(abundance_norm: &[f64], table: &GroupTable, with_termini: bool) -> f64 {

    let n_residue_types = table.residue_type_count();

    let mut mean_residue_mass = _calc_weighted_sum(
        &abundance_norm[..n_residue_types],
        table.residue_types(),
        |group| group.molar_mass_residue
    );

    if with_termini {
        mean_residue_mass += _calc_weighted_sum(
            &abundance_norm[n_residue_types..],
            table.termini(),
            |group| Some(group.molar_mass)
        );
    }

    mean_residue_mass
}

/// Nitrogen mass fraction, i.e. the residue nitrogen contents averaged with mass weights.
pub fn calc_nitrogen_content(abundance_norm: &[f64], table: &GroupTable) -> f64 {

    let nitrogen_mass = _calc_weighted_sum(abundance_norm, &table.groups, |group| {
        Some(group.nitrogen_content_residue? * group.molar_mass_residue?)
    });
    let total_mass = _calc_weighted_sum(abundance_norm, &table.groups, |group| {
        group.nitrogen_content_residue.and(group.molar_mass_residue)
    });

    nitrogen_mass / total_mass
}

// Groups without a defined value are left out of the sum
fn _calc_weighted_sum<F>(weights: &[f64], groups: &[GroupRecord], get_group_value: F) -> f64 where F: Fn(&GroupRecord) -> Option<f64> {

    let mut sum: f64 = 0.0;
    for (weight, group) in weights.iter().zip(groups) {
        if let Some(value) = get_group_value(group) {
            sum += weight * value;
        }
    }

    sum
}
