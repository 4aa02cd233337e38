mod cli_tests;
mod client_tests;
mod common;
