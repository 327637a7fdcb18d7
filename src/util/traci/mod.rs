pub mod buffer;
pub mod cmd;
pub mod response;
pub mod socket;
