//! Electrochemical properties of polyampholytes such as proteins: net charge
//! as a function of pH, isoelectric point, mean residue molar mass and
//! nitrogen content, computed from the amino acid composition.

pub mod chemistry;
pub mod error;
pub mod io;
pub mod titration;

pub use chemistry::composition::SequenceParsing;
pub use chemistry::constants::{DEFAULT_CURVE_POINTS, DEFAULT_PH_RANGE};
pub use chemistry::model::{GroupRecord, PkaScheme};
pub use chemistry::table::{GroupTable, AMINO_ACID_GROUP_TABLE};
pub use error::{PolyampholyteError, Result};
pub use titration::charge::ChargeCurve;
pub use titration::model::{Mode, Polyampholyte, ProteinInput};
