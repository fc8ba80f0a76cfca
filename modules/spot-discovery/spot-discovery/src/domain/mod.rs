pub mod catalog;
pub mod courses;
pub mod error;
pub mod favorites;
pub mod fields;
pub mod normalize;
pub mod ports;
pub mod repo;
pub mod reviews;
pub mod sample;
pub mod search;
pub mod tags;
pub mod time_ago;

#[cfg(test)]
mod favorites_test;
