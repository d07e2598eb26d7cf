//! Crate version from build metadata.

/// `{major, minor}` version pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    /// Major version.
    pub major: u16,
    /// Minor version.
    pub minor: u16,
}

fn parse_component(value: Option<&str>) -> Option<u16> {
    value?.trim().parse().ok()
}

/// Returns the crate version, or `{0, 0}` if build metadata is missing or
/// malformed.
pub fn version() -> Version {
    let major = parse_component(option_env!("CARGO_PKG_VERSION_MAJOR"));
    let minor = parse_component(option_env!("CARGO_PKG_VERSION_MINOR"));
    match (major, minor) {
        (Some(major), Some(minor)) => Version { major, minor },
        _ => Version::default(),
    }
}
