pub mod constants;
pub mod error;
pub mod geometry;
pub mod info;

pub use constants::*;
pub use error::LatticeError;
pub use geometry::{
    Footprint, Pose2, cont_theta_to_disc, cont_to_disc, disc_theta_to_cont, disc_to_cont,
};
pub use info::MapInfo;

pub type Result<T> = std::result::Result<T, LatticeError>;
