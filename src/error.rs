use roadmend_geo::{Crs, GeoError};
use strum::Display;
use thiserror::Error;

use crate::config::ConfigError;
use crate::enrich::LookupError;
use crate::graph::NetworkError;
use crate::impl_err;
use crate::load::LoadError;
use crate::render::RenderError;

pub type Result<T> = std::result::Result<T, Error>;

/// Which side of a comparison an input problem belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Dataset {
    Reference,
    Candidate,
}

/// Caller-supplied data that a stage cannot work with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("reference layers disagree on their coordinate reference system: {expected} and {found}")]
    CrsMismatch { expected: Crs, found: Crs },

    #[error("{dataset} dataset holds no line geometry after decomposition")]
    EmptyInput { dataset: Dataset },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Input(InputError),

    #[error(transparent)]
    Geo(GeoError),

    #[error(transparent)]
    Load(LoadError),

    #[error(transparent)]
    Network(NetworkError),

    #[error(transparent)]
    Lookup(LookupError),

    #[error(transparent)]
    Config(ConfigError),

    #[error(transparent)]
    Render(RenderError),
}

impl_err!(InputError, Input);
impl_err!(GeoError, Geo);
impl_err!(LoadError, Load);
impl_err!(NetworkError, Network);
impl_err!(LookupError, Lookup);
impl_err!(ConfigError, Config);
impl_err!(RenderError, Render);
