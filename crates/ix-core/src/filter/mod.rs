//! Temporal smoothing filters

mod one_euro;

pub use one_euro::{
    OneEuroConfig, OneEuroFilter, OneEuroFilterQuat, OneEuroFilterVec3, Signal,
};
