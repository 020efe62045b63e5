pub mod availability_mapper;
