//! Local data access for the mock backend

pub mod mock_store;
pub mod seed;

pub use mock_store::{MockStore, MEDICAL_INFO_KEY, STUDENTS_KEY, TRAININGS_KEY};
