pub mod applications;
pub mod claims;
pub mod farmers;
pub mod identity;
pub mod numbering;
pub mod policies;
pub mod validation;
