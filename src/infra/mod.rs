pub mod data;
pub mod doctor;
