#[allow(unused_imports)]
pub use itertools::Itertools;

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, Context, Result};
#[allow(unused_imports)]
pub use tracing::{error, info, warn};

#[allow(unused_imports)]
pub use crate::{
    core::config::*,
    geometry::{
        rotate, scale, scale_xy,
        shapes::{Line, Point, Polygon, Rect, Shape, Style},
        transform::{AffineTransform, RotationDirection, ScaleDirection, TranslationDirection},
        translate, GeometryError, Transformable,
    },
    scene::{Component, SceneError},
    sim::{
        odometry::{next_odometry, Odometry},
        robot::RobotMeasurements,
        BoundsError, Simulation, SimulationParameters,
    },
    util::{
        colour::Colour,
        linalg,
        linalg::{Mat2x2, Mat3x3, MatrixError, Vector2, Vector3},
        ApproxEq,
    },
};
