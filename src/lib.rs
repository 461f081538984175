//! Kinematic simulation of a steerable four-wheeled robot.
//!
//! The crate is layered bottom-up: [`util::linalg`] provides vectors and
//! homogeneous-coordinate matrices, [`geometry`] wraps them into affine
//! transforms and transformable shapes, [`scene`] arranges shapes into a
//! component tree with per-node transforms, and [`sim`] drives a robot
//! through that tree with a single-track kinematic model.
//!
//! Import [`core::prelude`] to pull the whole public surface into scope.

pub mod core;
pub mod geometry;
pub mod scene;
pub mod sim;
pub mod util;
