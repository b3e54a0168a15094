pub mod cli_main;
