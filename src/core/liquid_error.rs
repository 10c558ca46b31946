use std::fmt;

/// Reasons a liquid simulator cannot leave the uninitialized state.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// No mesh handle on the entity and none named by its `LiquidBehavior`
    MissingMesh,
    /// No material (parameter sink) to write the wobble parameters into
    MissingMaterial,
    /// The mesh exists but has no vertex positions to scan
    MeshHasNoPositions,
    InvalidConfig(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::MissingMesh => write!(f, "Liquid has no mesh"),
            InitError::MissingMaterial => write!(f, "Liquid has no material to write parameters to"),
            InitError::MeshHasNoPositions => write!(f, "Liquid mesh has no vertex positions"),
            InitError::InvalidConfig(reason) => write!(f, "Invalid liquid configuration: {}", reason),
        }
    }
}

impl std::error::Error for InitError {}

#[derive(Debug)]
pub enum ConfigError {
    Parse(ron::error::SpannedError),
    Invalid(String, InitError),
    UnknownPreset(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(error) => write!(f, "Failed to parse liquid presets: {}", error),
            ConfigError::Invalid(name, error) => write!(f, "Preset '{}': {}", name, error),
            ConfigError::UnknownPreset(name) => write!(f, "Unknown liquid preset '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(error) => Some(error),
            ConfigError::Invalid(_, error) => Some(error),
            ConfigError::UnknownPreset(_) => None,
        }
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(error: ron::error::SpannedError) -> Self {
        ConfigError::Parse(error)
    }
}
