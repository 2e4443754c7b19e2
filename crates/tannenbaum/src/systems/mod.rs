pub mod ambient;
pub mod animate;
pub mod composition;
pub mod layout;
pub mod lighting;
pub mod topper;
