//! Container number helpers (ISO 6346).

mod check_digit;

pub use check_digit::{build_container_no, calc_check_digit, ContainerNoError};
