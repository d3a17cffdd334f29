pub mod player_commands;
