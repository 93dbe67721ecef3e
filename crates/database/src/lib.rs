pub mod db;
pub mod entities;
pub mod error;
pub mod services;
pub mod unit_of_work;

#[cfg(test)]
mod testing;

pub use error::RecordsError;
