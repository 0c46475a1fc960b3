//! Container services: lifecycle primitives shared by the use-case services.

pub mod lifecycle;
