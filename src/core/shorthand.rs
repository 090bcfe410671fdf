//! docker-compose style shorthand for ports and volumes.

use crate::core::resolver::PathResolver;
use crate::domain::model::{PortMapping, VolumeMapping, VolumeMode};
use crate::utils::error::{PydevError, Result};

/// Parses `HOST_PORT` or `HOST_PORT:CONTAINER_PORT`.
pub fn parse_port(spec: &str) -> Result<PortMapping> {
    let invalid = |reason: String| PydevError::InvalidPortSpec {
        spec: spec.to_string(),
        reason,
    };

    let parts: Vec<&str> = spec.split(':').collect();
    let (host, container) = match parts.as_slice() {
        [single] => (*single, *single),
        [host, container] => (*host, *container),
        _ => {
            return Err(invalid(
                "expected HOST_PORT or HOST_PORT:CONTAINER_PORT".to_string(),
            ))
        }
    };

    let host_port = parse_port_number(host).map_err(invalid)?;
    let container_port = parse_port_number(container).map_err(invalid)?;

    Ok(PortMapping {
        host_port,
        container_port,
    })
}

fn parse_port_number(value: &str) -> std::result::Result<u16, String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("'{value}' is not a port number"));
    }

    match value.parse::<u32>() {
        Ok(port @ 1..=65535) => Ok(port as u16),
        _ => Err(format!("'{value}' is outside the valid port range 1-65535")),
    }
}

/// Parses `HOST:CONTAINER` or `HOST:CONTAINER:MODE`. The host side is expanded
/// but not required to exist yet.
pub fn parse_volume(spec: &str, resolver: &PathResolver) -> Result<VolumeMapping> {
    let invalid = |reason: &str| PydevError::InvalidVolumeSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = spec.split(':').collect();
    let (host, container, mode) = match parts.as_slice() {
        [host, container] => (*host, *container, VolumeMode::default()),
        [host, container, mode] => {
            let mode = parse_mode(mode)
                .ok_or_else(|| invalid(&format!("mode '{mode}' must be one of ro, rw")))?;
            (*host, *container, mode)
        }
        _ => return Err(invalid("expected HOST:CONTAINER[:MODE]")),
    };

    if host.is_empty() {
        return Err(invalid("host path is empty"));
    }
    if !container.starts_with('/') {
        return Err(invalid("container path must be absolute"));
    }

    Ok(VolumeMapping {
        host_path: resolver.expand(host),
        container_path: container.to_string(),
        mode,
    })
}

fn parse_mode(mode: &str) -> Option<VolumeMode> {
    match mode {
        "ro" => Some(VolumeMode::Ro),
        "rw" => Some(VolumeMode::Rw),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn resolver() -> PathResolver {
        PathResolver::new("/work", Some(PathBuf::from("/home/dev")))
    }

    #[test]
    fn test_single_port_maps_to_itself() {
        assert_eq!(
            parse_port("8080").unwrap(),
            PortMapping {
                host_port: 8080,
                container_port: 8080
            }
        );
    }

    #[test]
    fn test_host_and_container_port() {
        assert_eq!(
            parse_port("80:8080").unwrap(),
            PortMapping {
                host_port: 80,
                container_port: 8080
            }
        );
    }

    #[test]
    fn test_invalid_ports() {
        for spec in ["99999", "0", "", "80:", ":80", "abc", "+80", "1:2:3", "80:65536", " 80"] {
            assert!(
                matches!(parse_port(spec), Err(PydevError::InvalidPortSpec { .. })),
                "expected {spec:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_volume_with_mode() {
        let volume = parse_volume("~/my/utils:/utils:ro", &resolver()).unwrap();
        assert_eq!(volume.host_path, PathBuf::from("/home/dev/my/utils"));
        assert_eq!(volume.container_path, "/utils");
        assert_eq!(volume.mode, VolumeMode::Ro);
    }

    #[test]
    fn test_volume_defaults_to_rw() {
        let volume = parse_volume("~/x:/y", &resolver()).unwrap();
        assert_eq!(volume.host_path, PathBuf::from("/home/dev/x"));
        assert_eq!(volume.mode, VolumeMode::Rw);
    }

    #[test]
    fn test_relative_volume_host_is_made_absolute() {
        let volume = parse_volume("./data:/data:rw", &resolver()).unwrap();
        assert_eq!(volume.host_path, PathBuf::from("/work/data"));
    }

    #[test]
    fn test_invalid_volumes() {
        for spec in ["/only-host", "/a:/b:rx", "/a:/b:RO", ":/b", "/a:b", "/a:/b:ro:extra", "/a:"] {
            assert!(
                matches!(
                    parse_volume(spec, &resolver()),
                    Err(PydevError::InvalidVolumeSpec { .. })
                ),
                "expected {spec:?} to be rejected"
            );
        }
    }
}
