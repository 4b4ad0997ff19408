//! End-to-end tests for the pulsetalk engine, driven through the same
//! factory definitions the firmware ships

pub mod script;

#[cfg(test)]
mod pipeline_tests;

#[cfg(test)]
mod param_tests;

#[cfg(test)]
mod loader_tests;
