use std::fmt;
use std::path::{Path, PathBuf};

/// Error returned by [`ShaderSources::load`].
#[derive(Debug)]
pub enum ShaderLoadError {
    /// Neither a vertex nor a fragment path was supplied. There is nothing to
    /// preview; the sandbox never initializes.
    NoSources,
    /// A supplied path could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for ShaderLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderLoadError::NoSources => write!(f, "no shaders to load"),
            ShaderLoadError::Io { path, source } => {
                write!(f, "failed to read shader {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ShaderLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShaderLoadError::NoSources => None,
            ShaderLoadError::Io { source, .. } => Some(source),
        }
    }
}

/// Raw shader source text, one slot per stage.
///
/// Either slot may be absent; at least one is guaranteed present after a
/// successful [`load`](Self::load).
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    pub vertex: Option<String>,
    pub fragment: Option<String>,
}

impl ShaderSources {
    /// Reads one or two source files, keyed by whether each path is supplied.
    ///
    /// With zero paths a warning is logged and `NoSources` is returned — the
    /// caller must not proceed to scene initialization.
    pub fn load(
        vertex: Option<&Path>,
        fragment: Option<&Path>,
    ) -> Result<Self, ShaderLoadError> {
        if vertex.is_none() && fragment.is_none() {
            log::warn!("no shaders to load");
            return Err(ShaderLoadError::NoSources);
        }

        let vertex = vertex.map(read_source).transpose()?;
        let fragment = fragment.map(read_source).transpose()?;

        Ok(Self { vertex, fragment })
    }
}

fn read_source(path: &Path) -> Result<String, ShaderLoadError> {
    std::fs::read_to_string(path).map_err(|source| ShaderLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("shaderbox-test-{name}"));
        std::fs::write(&path, contents).expect("temp write");
        path
    }

    #[test]
    fn fragment_only_load_resolves() {
        let frag = write_temp("frag-only.wgsl", "// fragment body");
        let sources = ShaderSources::load(None, Some(&frag)).unwrap();
        assert_eq!(sources.fragment.as_deref(), Some("// fragment body"));
        assert!(sources.vertex.is_none());
        let _ = std::fs::remove_file(frag);
    }

    #[test]
    fn no_sources_is_an_error() {
        match ShaderSources::load(None, None) {
            Err(ShaderLoadError::NoSources) => {}
            other => panic!("expected NoSources, got {other:?}"),
        }
    }

    #[test]
    fn vertex_slot_loads_the_vertex_file() {
        // Each slot reads its own path; the vertex slot must not be fed the
        // fragment file.
        let vert = write_temp("stage-pair.vert.wgsl", "// vertex body");
        let frag = write_temp("stage-pair.frag.wgsl", "// fragment body");
        let sources = ShaderSources::load(Some(&vert), Some(&frag)).unwrap();
        assert_eq!(sources.vertex.as_deref(), Some("// vertex body"));
        assert_eq!(sources.fragment.as_deref(), Some("// fragment body"));
        let _ = std::fs::remove_file(vert);
        let _ = std::fs::remove_file(frag);
    }

    #[test]
    fn unreadable_path_reports_io_error_with_path() {
        let missing = std::env::temp_dir().join("shaderbox-test-does-not-exist.wgsl");
        match ShaderSources::load(None, Some(&missing)) {
            Err(ShaderLoadError::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
