//! Raw peripheral access and one-shot hardware initialisation.

pub mod hw_init;
