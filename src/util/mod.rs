#[macro_use]
pub mod macros;
pub mod io;
pub mod objects;
pub mod traci;
