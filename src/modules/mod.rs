pub mod control;
pub mod object;
pub mod traits;
pub mod wrapper;
