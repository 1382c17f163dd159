use error_stack::Report;
use ron::de::SpannedError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseFloatError;

#[derive(thiserror::Error, Debug)]
pub enum GeometryErrorKind {
    #[error("General Error: {0}")]
    General(String),
    #[error("Parse Error: {0}")]
    Parse(String),
}

#[derive(Debug)]
pub struct GeometryError(pub Report<GeometryErrorKind>);

impl Display for GeometryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl GeometryError {
    #[track_caller]
    pub fn new(error: GeometryErrorKind) -> GeometryError {
        GeometryError(Report::new(error))
    }

    #[track_caller]
    pub fn change_context<S: Into<String>>(self, message: S) -> Self {
        Self(
            self.0
                .change_context(GeometryErrorKind::General(message.into())),
        )
    }

    pub fn kind(&self) -> &GeometryErrorKind {
        self.0.current_context()
    }
}

pub type GeometryResult<T> = Result<T, GeometryError>;

impl<T> From<T> for GeometryError
where
    for<'a> &'a T: Into<GeometryErrorKind>,
    T: Error + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: T) -> Self {
        let kind: GeometryErrorKind = (&error).into();
        let report = Report::new(error);
        let report = report.change_context(kind);
        Self(report)
    }
}

impl From<&serde_yml::Error> for GeometryErrorKind {
    #[track_caller]
    fn from(error: &serde_yml::Error) -> Self {
        Self::Parse(format!("YAML Error: {}", error))
    }
}

impl From<&SpannedError> for GeometryErrorKind {
    #[track_caller]
    fn from(error: &SpannedError) -> Self {
        Self::Parse(format!("RON Error: {}", error))
    }
}

impl From<&ParseFloatError> for GeometryErrorKind {
    #[track_caller]
    fn from(error: &ParseFloatError) -> Self {
        Self::Parse(format!("Failed to parse float value: {}", error))
    }
}

impl From<String> for GeometryErrorKind {
    #[track_caller]
    fn from(error: String) -> Self {
        Self::General(error)
    }
}

impl From<&str> for GeometryError {
    #[track_caller]
    fn from(error: &str) -> Self {
        Self(Report::new(GeometryErrorKind::General(error.to_string())))
    }
}

#[macro_export]
macro_rules! bail {
    ($($args:tt)+) => {
        return Err($crate::result::GeometryError::new(format!($($args)+).into()))
    }
}

#[macro_export]
macro_rules! err {
    ($($args:tt)+) => {
        $crate::result::GeometryError::new(format!($($args)+).into())
    };
}

#[macro_export]
macro_rules! context {
    ($what:literal => $block:block) => {
        ::std::result::Result::map_err($block, |e: $crate::result::GeometryError| {
            e.change_context(concat!("Failed to ", $what))
        })
    };
}
pub use context;

#[cfg(test)]
mod tests {
    use crate::result::{GeometryError, GeometryErrorKind, GeometryResult};

    #[test]
    fn test_context_macro_ok() {
        let result = {
            context!("measure stuff" => {
                Ok(0)
            })
        }
        .unwrap();
        assert_eq!(result, 0);
    }

    #[test]
    fn test_context_macro_err() {
        fn my_broken_function() -> GeometryResult<u32> {
            Err("unmeasurable")?
        }
        let result = {
            context!("measure stuff" => {
                my_broken_function()
            })
        }
        .expect_err("Should have errored, but was");
        assert_eq!(
            "General Error: Failed to measure stuff",
            result.to_string()
        );
        assert!(format!("{:?}", result).contains("unmeasurable"));
    }

    #[test]
    fn test_parse_float_error_is_parse_kind() {
        fn parse(input: &str) -> GeometryResult<f32> {
            Ok(input.parse::<f32>()?)
        }
        let error = parse("twelve").expect_err("should not parse");
        assert!(matches!(error.kind(), GeometryErrorKind::Parse(_)));
        assert_eq!(
            "Parse Error: Failed to parse float value: invalid float literal",
            error.to_string()
        );
    }

    #[test]
    fn test_string_is_general_kind() {
        let kind = GeometryErrorKind::from(format!("slot {} is gone", 4));
        assert!(matches!(kind, GeometryErrorKind::General(_)));
        let error = GeometryError::new(kind);
        assert_eq!("General Error: slot 4 is gone", error.to_string());
    }

    #[test]
    fn test_err_macro() {
        fn fail() -> GeometryResult<()> {
            bail!("bad value {}", 3)
        }
        assert_eq!("General Error: bad value 3", fail().unwrap_err().to_string());
        assert_eq!("General Error: x", err!("x").to_string());
    }
}
