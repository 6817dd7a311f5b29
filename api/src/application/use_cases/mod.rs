pub mod applications;
pub mod claims;
pub mod farmers;
pub mod policies;
