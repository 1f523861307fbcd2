pub mod feedback;
pub mod staff;
