//! Review storage adapters.

pub mod entity;
pub mod mapper;
pub mod memory_repo;
pub mod migrations;
pub mod sea_orm_repo;

#[cfg(test)]
mod sea_orm_repo_test;
