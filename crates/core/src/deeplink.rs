//! Deep-link encoding for sharing a view
//!
//! A deep link captures the active scene index and camera orientation as URL
//! query parameters (`scene`, `yaw`, `pitch`, `fov`). Angles are rounded to
//! integers; the round trip is an integer contract, not a lossless one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::CameraPose;

/// Deep-link parse failure
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeepLinkError {
    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid value for {param}: {value}")]
    InvalidValue { param: &'static str, value: String },
}

/// A shareable view: scene index plus rounded camera angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLink {
    pub scene: usize,
    pub yaw: i32,
    pub pitch: i32,
    pub fov: i32,
}

impl DeepLink {
    /// Build a deep link from a scene index and the viewer's camera pose
    pub fn new(scene: usize, pose: CameraPose) -> Self {
        Self {
            scene,
            yaw: pose.yaw.round() as i32,
            pitch: pose.pitch.round() as i32,
            fov: pose.hfov.round() as i32,
        }
    }

    /// Encode as a URL query string (no leading `?`)
    pub fn to_query(&self) -> String {
        format!(
            "scene={}&yaw={}&pitch={}&fov={}",
            self.scene, self.yaw, self.pitch, self.fov
        )
    }

    /// Parse from a query string, with or without a leading `?`
    pub fn parse(query: &str) -> Result<Self, DeepLinkError> {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut scene = None;
        let mut yaw = None;
        let mut pitch = None;
        let mut fov = None;

        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some(kv) => kv,
                None => continue,
            };
            match key {
                "scene" => scene = Some(parse_int::<usize>("scene", value)?),
                "yaw" => yaw = Some(parse_int::<i32>("yaw", value)?),
                "pitch" => pitch = Some(parse_int::<i32>("pitch", value)?),
                "fov" => fov = Some(parse_int::<i32>("fov", value)?),
                _ => {}
            }
        }

        Ok(Self {
            scene: scene.ok_or(DeepLinkError::MissingParam("scene"))?,
            yaw: yaw.ok_or(DeepLinkError::MissingParam("yaw"))?,
            pitch: pitch.ok_or(DeepLinkError::MissingParam("pitch"))?,
            fov: fov.ok_or(DeepLinkError::MissingParam("fov"))?,
        })
    }
}

fn parse_int<T: std::str::FromStr>(param: &'static str, value: &str) -> Result<T, DeepLinkError> {
    value.parse::<T>().map_err(|_| DeepLinkError::InvalidValue {
        param,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_rounds_to_integers() {
        let link = DeepLink::new(2, CameraPose::new(15.4, -3.2, 90.9));
        let query = link.to_query();
        assert_eq!(query, "scene=2&yaw=15&pitch=-3&fov=91");

        let parsed = DeepLink::parse(&query).unwrap();
        assert_eq!(parsed.scene, 2);
        assert_eq!(parsed.yaw, 15);
        assert_eq!(parsed.pitch, -3);
        assert_eq!(parsed.fov, 91);
    }

    #[test]
    fn test_parse_with_leading_question_mark() {
        let parsed = DeepLink::parse("?scene=0&yaw=0&pitch=0&fov=100").unwrap();
        assert_eq!(parsed.scene, 0);
        assert_eq!(parsed.fov, 100);
    }

    #[test]
    fn test_parse_ignores_unknown_params() {
        let parsed = DeepLink::parse("scene=1&yaw=10&pitch=5&fov=95&utm=x").unwrap();
        assert_eq!(parsed.scene, 1);
    }

    #[test]
    fn test_parse_missing_param() {
        let err = DeepLink::parse("scene=1&yaw=10&pitch=5").unwrap_err();
        assert_eq!(err, DeepLinkError::MissingParam("fov"));
    }

    #[test]
    fn test_parse_invalid_value() {
        let err = DeepLink::parse("scene=abc&yaw=0&pitch=0&fov=90").unwrap_err();
        assert!(matches!(err, DeepLinkError::InvalidValue { param: "scene", .. }));
    }
}
