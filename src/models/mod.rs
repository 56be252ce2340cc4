pub mod customer;
pub mod filter;
pub mod requests;
pub mod responses;
