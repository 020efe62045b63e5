pub mod availability;
