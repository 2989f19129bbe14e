pub mod error;
pub mod roster;
pub mod scan;
pub mod zones;
