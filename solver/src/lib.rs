pub mod algorithms;
pub mod api;
pub mod maze;
pub mod solvers;
