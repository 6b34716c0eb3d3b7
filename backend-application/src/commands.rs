// Application commands

pub mod attendance_commands;
pub mod scan_commands;
pub mod token_commands;
