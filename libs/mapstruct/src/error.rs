#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("record nesting exceeds {limit} levels at '{path}'")]
    DepthExceeded { path: String, limit: usize },

    #[error("config error: {0}")]
    Config(String),
}

impl MapError {
    /// Add context to the error.
    ///
    /// For `DepthExceeded`, context is prepended to the path as its outermost
    /// segment. For `Config`, it is prepended to the message.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            MapError::DepthExceeded { path, limit } => MapError::DepthExceeded {
                path: if path.is_empty() {
                    ctx.to_string()
                } else {
                    format!("{ctx}.{path}")
                },
                limit,
            },
            MapError::Config(msg) => MapError::Config(format!("{ctx}: {msg}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_prefixes_config_message() {
        let err = MapError::Config("bad".into()).with_context("map options");
        assert_eq!(err.to_string(), "config error: map options: bad");
    }

    #[test]
    fn context_prefixes_depth_path() {
        let err = MapError::DepthExceeded { path: "a[0]".into(), limit: 2 }.with_context("order");
        assert!(matches!(err, MapError::DepthExceeded { ref path, limit: 2 } if path == "order.a[0]"));

        let err = MapError::DepthExceeded { path: String::new(), limit: 1 }.with_context("order");
        assert!(matches!(err, MapError::DepthExceeded { ref path, .. } if path == "order"));
    }
}
