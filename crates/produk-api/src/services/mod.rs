pub mod assembler;
pub mod form;
pub mod forwarder;
pub mod validation;
