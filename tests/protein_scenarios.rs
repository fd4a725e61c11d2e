use std::io::Write;

use polyampholyte::{
    GroupTable, Mode, PkaScheme, Polyampholyte, PolyampholyteError, ProteinInput, SequenceParsing,
    AMINO_ACID_GROUP_TABLE, DEFAULT_PH_RANGE,
};

// Sewald et al., Macromol. Biosci. 2018, 18, 1800168 (mmol/g, table order)
const GELATIN_TYPE_A: [f64; 20] = [
    0.286, 0.158, 0.144, 0.328, 0.469, 0.245, 3.314, 1.037, 0.0, 0.206,
    0.06, 0.094, 0.223, 0.033, 0.126, 0.048, 0.325, 0.483, 2.082, 0.0,
];
const GELATIN_TYPE_B: [f64; 22] = [
    0.427, 0.0, 0.154, 0.306, 0.701, 0.0, 3.248, 1.104, 0.0, 0.201,
    0.05, 0.111, 0.238, 0.01, 0.116, 0.038, 0.314, 0.462, 2.046, 0.0, 0.0, 0.0,
];

// UniProt P02769, mature chain
const BOVINE_SERUM_ALBUMIN: &str = concat!(
    "DTHKSEIAHRFKDLGEEHFKGLVLI",
    "AFSQYLQQCPFDEHVKLVNELTEFAKTCVADESHAGCEKSLHTLFGDEL",
    "CKVASLRETYGDMADCCEKQEPERNECFLSHKDDSPDLPKLKPDPNTLC",
    "DEFKADEKKFWGKYLYEIARRHPYFYAPELLYYANKYNGVFQECCQAED",
    "KGACLLPKIETMREKVLASSARQRLRCASIQKFGERALKAWSVARLSQK",
    "FPKAEFVEVTKLVTDLTKVHKECCHGDLLECADDRADLAKYICDNQDTI",
    "SSKLKECCDKPLLEKSHCIAEVEKDAIPENLPPLTADFAEDKDVCKNYQ",
    "EAKDAFLGSFLYEYSRRHPEYAVSVLLRLAKEYEATLEECCAKDDPHAC",
    "YSTVFDKLKHLVDEPQNLIKQNCDQFEKLGEYGFQNALIVRYTRKVPQV",
    "STPTLVEVSRSLGKVGTRCCTKPESERMPCTEDYLSLILNRLCVLHEKT",
    "PVSEKVTKCCTESLVNRRPCFSALTPDETYVPKAFDEKLFTFHADICTL",
    "PDTEKQIKKQTALVELLKHKPKATEEQLKTVMENFVAFVDKCCAADDKE",
    "ACFAVEGPKLVVSTQTALA",
);

fn iep_per_scheme(poly: &mut Polyampholyte) -> Vec<f64> {
    PkaScheme::ALL
        .iter()
        .map(|scheme| {
            poly.set_pka_scheme(*scheme);
            poly.isoelectric_point(DEFAULT_PH_RANGE).unwrap()
        })
        .collect()
}

fn assert_schemes_disagree_within(ieps: &[f64], max_spread: f64) {
    for (i, a) in ieps.iter().enumerate() {
        assert!(a.is_finite() && (0.0..=14.0).contains(a), "{:?}", ieps);
        for b in &ieps[i + 1..] {
            assert_ne!(a, b, "{:?}", ieps);
            assert!((a - b).abs() < max_spread, "{:?}", ieps);
        }
    }
}

#[test]
fn gelatin_type_a_is_basic() {
    let mut gelatin = Polyampholyte::from_abundance(GELATIN_TYPE_A.to_vec()).unwrap();
    assert_eq!(gelatin.pka_scheme(), PkaScheme::Bjellqvist);

    let iep = gelatin.isoelectric_point(DEFAULT_PH_RANGE).unwrap();
    assert!((iep - 9.23).abs() < 0.05, "{}", iep);

    assert_schemes_disagree_within(&iep_per_scheme(&mut gelatin), 2.0);
}

#[test]
fn gelatin_type_b_is_acidic() {
    let mut gelatin = Polyampholyte::from_abundance(GELATIN_TYPE_B.to_vec()).unwrap();

    let iep = gelatin.isoelectric_point(DEFAULT_PH_RANGE).unwrap();
    assert!((iep - 4.73).abs() < 0.05, "{}", iep);

    assert_schemes_disagree_within(&iep_per_scheme(&mut gelatin), 2.0);
}

#[test]
fn bovine_serum_albumin_from_sequence() {
    let mut bsa = Polyampholyte::new(
        Mode::Protein,
        ProteinInput::sequence(BOVINE_SERUM_ALBUMIN),
        "pka_bjellqvist".parse().unwrap(),
    ).unwrap();

    assert_eq!(bsa.residue_count(), Some(583));

    let iep = bsa.isoelectric_point(DEFAULT_PH_RANGE).unwrap();
    assert!((iep - 5.60).abs() < 0.05, "{}", iep);
    assert!(bsa.charge(iep).abs() < 1e-9);

    let mass = bsa.molar_mass().unwrap();
    assert!((mass - 66432.3).abs() < 1.0, "{}", mass);

    let mean_residue_mass = bsa.mean_residue_molar_mass();
    assert!((mean_residue_mass - mass / 583.0).abs() < 1e-6, "{}", mean_residue_mass);

    let n_content = bsa.nitrogen_content();
    assert!((n_content - 0.1647).abs() < 1e-3, "{}", n_content);

    assert_schemes_disagree_within(&iep_per_scheme(&mut bsa), 2.0);
}

#[test]
fn abundance_and_sequence_construction_agree_on_charge() {
    let from_sequence = Polyampholyte::from_sequence(BOVINE_SERUM_ALBUMIN).unwrap();
    let from_abundance = Polyampholyte::from_abundance(from_sequence.abundance_input().to_vec()).unwrap();

    assert_eq!(from_sequence.abundance_norm(), from_abundance.abundance_norm());
    assert_eq!(
        from_sequence.isoelectric_point(DEFAULT_PH_RANGE).unwrap(),
        from_abundance.isoelectric_point(DEFAULT_PH_RANGE).unwrap()
    );

    assert!(from_sequence.molar_mass().is_ok());
    assert!(matches!(from_abundance.molar_mass(), Err(PolyampholyteError::MissingSequence)));
}

#[test]
fn residue_normalization_for_both_inputs() {
    let from_abundance = Polyampholyte::from_abundance(GELATIN_TYPE_A.to_vec()).unwrap();
    let from_sequence = Polyampholyte::from_sequence(BOVINE_SERUM_ALBUMIN).unwrap();

    for poly in [&from_abundance, &from_sequence] {
        let n_residue_types = poly.table().residue_type_count();
        let residue_sum: f64 = poly.abundance_norm()[..n_residue_types].iter().sum();
        assert!((residue_sum - 1.0).abs() < 1e-12);
    }

    // termini per residue push the total over one for sequences
    let total: f64 = from_sequence.abundance_norm().iter().sum();
    assert!((total - (1.0 + 2.0 / 583.0)).abs() < 1e-12);
}

#[test]
fn lenient_sequence_drops_unknown_codes() {
    let noisy = format!("{}XXBZ", BOVINE_SERUM_ALBUMIN);

    let strict = Polyampholyte::from_sequence(&noisy);
    assert!(matches!(strict, Err(PolyampholyteError::UnrecognizedResidue { residue: 'X', position: 583 })));

    let input = ProteinInput::from_parts(None, Some(noisy), SequenceParsing::Lenient).unwrap();
    let lenient = Polyampholyte::new(Mode::Protein, input, PkaScheme::Bjellqvist).unwrap();
    let counted: f64 = lenient.abundance_input()[..20].iter().sum();

    assert_eq!(lenient.residue_count(), Some(587));
    assert_eq!(counted, 583.0);
}

#[test]
fn custom_table_from_csv_file() {
    let mut csv_content = String::from(
        "id,name,molar_mass,molar_mass_residue,nitrogen_content_residue,charge_indicator,pka_bjellqvist,pka_ipc_protein,pka_emboss\n"
    );
    for record in AMINO_ACID_GROUP_TABLE.groups.iter() {
        let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
        // lysine shifted by one pH unit in every scheme
        let shift = if record.id == "K" { 1.0 } else { 0.0 };
        csv_content.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            record.id,
            record.name,
            record.molar_mass,
            opt(record.molar_mass_residue),
            opt(record.nitrogen_content_residue),
            opt(record.charge_indicator),
            opt(record.pka_bjellqvist.map(|p| p + shift)),
            opt(record.pka_ipc_protein.map(|p| p + shift)),
            opt(record.pka_emboss.map(|p| p + shift)),
        ));
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(csv_content.as_bytes()).unwrap();

    let table = GroupTable::from_csv_path(file.path()).unwrap();
    assert_eq!(table.len(), AMINO_ACID_GROUP_TABLE.len());

    let default = Polyampholyte::from_abundance(GELATIN_TYPE_A.to_vec()).unwrap();
    let shifted = Polyampholyte::with_table(
        &table,
        Mode::Protein,
        ProteinInput::abundance(GELATIN_TYPE_A.to_vec()),
        PkaScheme::Bjellqvist,
    ).unwrap();

    let default_iep = default.isoelectric_point(DEFAULT_PH_RANGE).unwrap();
    let shifted_iep = shifted.isoelectric_point(DEFAULT_PH_RANGE).unwrap();
    assert!(shifted_iep > default_iep + 0.5, "{} {}", default_iep, shifted_iep);
}

#[test]
fn missing_table_file() {
    let err = GroupTable::from_csv_path("/nonexistent/group_properties.csv").unwrap_err();
    assert!(matches!(err, PolyampholyteError::TableIo(_)));
}
