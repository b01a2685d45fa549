//! Integration tests for the tfinv binary
//!
//! These run the real executable; the terraform boundary is a stub script
//! placed in a temp directory.

mod generate_command;
