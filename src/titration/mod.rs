pub mod charge;
pub mod model;
pub mod root;
