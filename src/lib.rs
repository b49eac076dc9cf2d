//! Client for the firmware-update subsystem of ISAM appliances.

pub mod commands;
pub mod settings;
pub mod traits;
pub mod updates;

#[cfg(test)]
mod test_helpers;
