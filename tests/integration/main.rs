//! Integration tests for typewrite

mod cli_test;
mod helpers;
mod playback_test;
mod script_test;
