use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

pub fn detect_color(color_flag: bool) -> bool {
    if !color_flag {
        return false;
    }
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    std::io::stdout().is_terminal()
}

/// Serialize `value` for `--json` output.
pub fn to_json<T: serde::Serialize>(value: &T, opts: &OutputOptions) -> serde_json::Result<String> {
    if opts.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_disabled_by_flag() {
        assert!(!detect_color(false));
    }

    #[test]
    fn to_json_respects_pretty() {
        let mut opts = OutputOptions {
            format: OutputFormat::Json,
            pretty: false,
            use_color: false,
            verbose: false,
        };
        let value = serde_json::json!({ "a": 1 });
        assert_eq!(to_json(&value, &opts).unwrap(), r#"{"a":1}"#);
        opts.pretty = true;
        assert!(to_json(&value, &opts).unwrap().contains('\n'));
    }
}
