//! Mock upstream providers for integration testing

pub mod upstream;
