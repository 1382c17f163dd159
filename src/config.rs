use crate::context;
use crate::geometry::fit::ScaleMode;
use crate::geometry::rectangle::Rectangle;
use crate::result::{GeometryError, GeometryResult};
use log::info;
use serde::{Deserialize, Serialize};

/// Viewport fitting options, usually loaded from a RON or YAML settings file
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    pub scale_mode: ScaleMode,
    pub pixel_perfect: bool,
}

impl FitSettings {
    pub fn new(scale_mode: ScaleMode, pixel_perfect: bool) -> Self {
        Self {
            scale_mode,
            pixel_perfect,
        }
    }

    pub fn from_ron(input: &str) -> GeometryResult<Self> {
        info!("Loading fit settings from RON");
        context!("parse fit settings from RON" => {
            ron::from_str(input).map_err(GeometryError::from)
        })
    }

    pub fn from_yaml(input: &str) -> GeometryResult<Self> {
        info!("Loading fit settings from YAML");
        context!("parse fit settings from YAML" => {
            serde_yml::from_str(input).map_err(GeometryError::from)
        })
    }

    pub fn fit(&self, source: &Rectangle, into: &Rectangle) -> Rectangle {
        source.fit_into(into, self.scale_mode, self.pixel_perfect)
    }
}
