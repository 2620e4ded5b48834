pub mod api;
pub mod db;
pub mod paths;
pub mod payment;
