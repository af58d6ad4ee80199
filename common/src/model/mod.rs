pub mod collection;
pub mod connection;
pub mod general_option;
pub mod license;
pub mod namespace;
