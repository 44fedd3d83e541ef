pub mod load;
pub mod status;
