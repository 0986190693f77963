//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{MovementProfile, ProfileResources};
use crate::movement::ConfigError;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
    pub invalid: Option<ConfigError>,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.invalid
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct, naming `file` in any error.
fn parse_single<T>(contents: &str, file: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
            invalid: None,
        })
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
        invalid: None,
    })?;

    parse_single(&contents, &file_name)
}

fn validate(profile: &MovementProfile, file: &str) -> Result<ProfileResources, ContentLoadError> {
    profile.build().map_err(|e| ContentLoadError {
        file: file.to_string(),
        message: format!("Invalid value: {}", e),
        invalid: Some(e),
    })
}

/// Parse and validate a movement profile held in memory.
pub fn parse_movement_profile(
    contents: &str,
    file: &str,
) -> Result<(MovementProfile, ProfileResources), ContentLoadError> {
    let profile: MovementProfile = parse_single(contents, file)?;
    let resources = validate(&profile, file)?;
    Ok((profile, resources))
}

/// Load and validate the movement profile at `path`.
pub fn load_movement_profile(
    path: &Path,
) -> Result<(MovementProfile, ProfileResources), ContentLoadError> {
    let profile: MovementProfile = load_single_file(path)?;
    let resources = validate(&profile, &path.display().to_string())?;
    Ok((profile, resources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{GameLayer, MovementTuning};

    #[test]
    fn test_partial_profile_falls_back_to_defaults() {
        let ron = r#"(
            tick_rate_hz: 100.0,
            tuning: (
                jump_height: 8.0,
                air_jumps_allowed: 2,
            ),
        )"#;

        let (profile, resources) = parse_movement_profile(ron, "inline.ron").unwrap();

        assert_eq!(profile.tick_rate_hz, 100.0);
        assert_eq!(profile.tuning.jump_height, 8.0);
        assert_eq!(profile.tuning.air_jumps_allowed, 2);
        assert_eq!(
            profile.tuning.max_walk_speed,
            MovementTuning::default().max_walk_speed
        );
        assert!((resources.config.tick_length() - 0.01).abs() < 1e-6);
        assert_eq!(resources.ground_layers.layers(), &[GameLayer::Ground]);
    }

    #[test]
    fn test_shipped_profile_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/movement.ron");
        let (profile, resources) = load_movement_profile(&path).unwrap();

        assert_eq!(profile.tick_rate_hz, 50.0);
        assert_eq!(profile.tuning, MovementTuning::default());
        assert!((resources.config.tick_length() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_value_reports_config_error() {
        let ron = "(tuning: (time_till_jump_apex: 0.0))";
        let err = parse_movement_profile(ron, "bad.ron").unwrap_err();

        assert_eq!(err.file, "bad.ron");
        assert!(matches!(
            err.invalid,
            Some(ConfigError::NonPositive {
                field: "time_till_jump_apex",
                ..
            })
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_empty_ground_layers_rejected() {
        let ron = "(collision: (ground_layers: []))";
        let err = parse_movement_profile(ron, "bad.ron").unwrap_err();
        assert_eq!(err.invalid, Some(ConfigError::NoGroundLayer));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let err = parse_movement_profile("(tuning: (jump_height: \"high\"))", "bad.ron")
            .unwrap_err();
        assert!(err.message.starts_with("Parse error"));
        assert!(err.invalid.is_none());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_movement_profile(Path::new("does/not/exist.ron")).unwrap_err();
        assert!(err.message.starts_with("IO error"));
    }
}
