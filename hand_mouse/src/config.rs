//! Application configuration: an optional JSON file, then command-line
//! overrides.
//!
//! ```json
//! {
//!   "control": { "smoothing_factor": 6.0, "pinch_threshold": 40.0, "mirror_x": true },
//!   "pointer": "os"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pinch_pointer::ControlConfig;

use crate::error::AppError;
use crate::pointer::PointerBackend;

pub const USAGE: &str = "\
usage: hand_mouse [options]

  --config <file.json>   load settings from a JSON file (flags below override it)
  --factor <f>           smoothing factor, > 1 (default 5)
  --threshold <px>       pinch distance in screen pixels (default 50)
  --release <px>         release distance for hysteresis (default = threshold)
  --confidence <0..1>    minimum detection score (default 0.8)
  --mirror               mirror the horizontal axis
  --os-pointer           drive the real desktop pointer (hardware mode only)
  -h, --help             show this text";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub control: ControlConfig,
    pub pointer: PointerBackend,
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Run(AppConfig),
    Help,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, AppError> {
        let cfg: AppConfig = serde_json::from_str(text).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.control.validate()?;
        Ok(cfg)
    }

    /// Build the configuration from `args` (without the program name).
    pub fn from_args<I>(args: I) -> Result<Command, AppError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();

        // The file is the base layer regardless of where --config appears.
        let mut cfg = match args.iter().position(|a| a == "--config") {
            Some(i) => {
                let path = args.get(i + 1)
                    .ok_or_else(|| AppError::Usage("--config needs a file path".into()))?;
                AppConfig::load(&PathBuf::from(path))?
            }
            None => AppConfig::default(),
        };

        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--config"     => { it.next(); }
                "--factor"     => cfg.control.smoothing_factor = value(&mut it, arg)?,
                "--threshold"  => cfg.control.pinch_threshold = value(&mut it, arg)?,
                "--release"    => cfg.control.release_threshold = Some(value(&mut it, arg)?),
                "--confidence" => cfg.control.min_confidence = value(&mut it, arg)?,
                "--mirror"     => cfg.control.mirror_x = true,
                "--os-pointer" => cfg.pointer = PointerBackend::Os,
                "-h" | "--help" => return Ok(Command::Help),
                other => return Err(AppError::Usage(format!("unknown option `{other}`"))),
            }
        }

        cfg.control.validate()?;
        Ok(Command::Run(cfg))
    }
}

fn value<'a, T, I>(it: &mut I, flag: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    I: Iterator<Item = &'a String>,
{
    let raw = it.next()
        .ok_or_else(|| AppError::Usage(format!("{flag} needs a value")))?;
    raw.trim().parse()
        .map_err(|_| AppError::Usage(format!("{flag}: `{raw}` is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run_cfg(list: &[&str]) -> AppConfig {
        match AppConfig::from_args(args(list)).unwrap() {
            Command::Run(cfg) => cfg,
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn no_args_gives_defaults() {
        assert_eq!(run_cfg(&[]), AppConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = run_cfg(&["--factor", "8", "--threshold", "35", "--mirror", "--os-pointer"]);
        assert_eq!(cfg.control.smoothing_factor, 8.0);
        assert_eq!(cfg.control.pinch_threshold, 35.0);
        assert!(cfg.control.mirror_x);
        assert_eq!(cfg.pointer, PointerBackend::Os);
    }

    #[test]
    fn release_and_confidence_flags() {
        let cfg = run_cfg(&["--release", "70", "--confidence", "0.5"]);
        assert_eq!(cfg.control.release(), 70.0);
        assert_eq!(cfg.control.min_confidence, 0.5);
    }

    #[test]
    fn help_flag() {
        assert_eq!(AppConfig::from_args(args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn bad_input_is_a_usage_error() {
        assert!(matches!(AppConfig::from_args(args(&["--factor"])), Err(AppError::Usage(_))));
        assert!(matches!(AppConfig::from_args(args(&["--factor", "abc"])), Err(AppError::Usage(_))));
        assert!(matches!(AppConfig::from_args(args(&["--bogus"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        assert!(matches!(
            AppConfig::from_args(args(&["--factor", "1"])),
            Err(AppError::Control(_))
        ));
    }

    #[test]
    fn file_values_fill_the_app_config() {
        let cfg = AppConfig::parse(
            r#"{ "control": { "smoothing_factor": 3.0, "pinch_threshold": 20.0 }, "pointer": "os" }"#,
            Path::new("test.json"),
        ).unwrap();
        assert_eq!(cfg.control.smoothing_factor, 3.0);
        assert_eq!(cfg.control.pinch_threshold, 20.0);
        assert_eq!(cfg.control.min_confidence, 0.8);
        assert_eq!(cfg.pointer, PointerBackend::Os);
    }

    #[test]
    fn json_layers_under_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hand_mouse.json");
        fs::write(
            &path,
            r#"{ "control": { "smoothing_factor": 3.0, "pinch_threshold": 20.0 } }"#,
        ).unwrap();
        let path = path.to_string_lossy().into_owned();

        // Flag before and after --config: the flag wins either way.
        for list in [
            ["--threshold", "35", "--config", path.as_str()],
            ["--config", path.as_str(), "--threshold", "35"],
        ] {
            let cfg = run_cfg(&list);
            assert_eq!(cfg.control.pinch_threshold, 35.0);
            assert_eq!(cfg.control.smoothing_factor, 3.0);
            assert_eq!(cfg.pointer, PointerBackend::Virtual);
        }
    }

    #[test]
    fn invalid_json_reports_path() {
        let err = AppConfig::parse("{ not json", Path::new("broken.json")).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::from_args(args(&["--config", "/nonexistent/hand_mouse.json"])).unwrap_err();
        assert!(matches!(err, AppError::ConfigRead { .. }));
    }
}
