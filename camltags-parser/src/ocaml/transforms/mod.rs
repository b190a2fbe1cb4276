//! Transform pipeline infrastructure
//!
//! Processing stages are composed into typed pipelines. A pipeline takes the source text and
//! produces whatever its last stage produces, and the compiler checks that every stage accepts
//! what the previous one returns.
//!
//! # Architecture Overview
//!
//! ## 1. The `Runnable` Trait
//!
//! Implemented by every stage:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! ## 2. The `Transform<I, O>` Type
//!
//! A boxed, composable pipeline. `.then()` appends a stage:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(TagExtraction::new(options)); // String → Extraction
//! ```
//!
//! ## 3. Static Lazy Transforms
//!
//! The common pipelines are built once, see [`standard`].
//!
//! # Module Organization
//!
//! - [`stages`]: the individual stages (tokenization, tag extraction)
//! - [`standard`]: the pre-built pipelines

pub mod stages;
pub mod standard;

use std::fmt;

/// Error that can occur during transformation
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Generic error with message
    Error(String),
    /// Stage failed with specific error
    StageFailed { stage: String, message: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::Error(msg) => write!(f, "{}", msg),
            TransformError::StageFailed { stage, message } => {
                write!(f, "Stage '{}' failed: {}", stage, message)
            }
        }
    }
}

impl std::error::Error for TransformError {}

impl From<String> for TransformError {
    fn from(s: String) -> Self {
        TransformError::Error(s)
    }
}

impl From<&str> for TransformError {
    fn from(s: &str) -> Self {
        TransformError::Error(s.to_string())
    }
}

/// Anything that can turn an input into an output
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, feeding it this transform's output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountLines;
    impl Runnable<String, usize> for CountLines {
        fn run(&self, input: String) -> Result<usize, TransformError> {
            Ok(input.lines().count())
        }
    }

    struct RejectEmpty;
    impl Runnable<usize, usize> for RejectEmpty {
        fn run(&self, input: usize) -> Result<usize, TransformError> {
            if input == 0 {
                Err(TransformError::StageFailed {
                    stage: "RejectEmpty".to_string(),
                    message: "no lines".to_string(),
                })
            } else {
                Ok(input)
            }
        }
    }

    #[test]
    fn test_stages_compose() {
        let transform = Transform::from_fn(|s: String| Ok(s.trim().to_string()))
            .then(CountLines)
            .then(RejectEmpty);
        assert_eq!(transform.run("let x = 1\nlet y = 2\n".to_string()), Ok(2));
    }

    #[test]
    fn test_error_propagation() {
        let transform = Transform::from_fn(|s: String| Ok(s))
            .then(CountLines)
            .then(RejectEmpty);
        assert_eq!(
            transform.run(String::new()).unwrap_err().to_string(),
            "Stage 'RejectEmpty' failed: no lines"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: TransformError = "broken".into();
        assert_eq!(err, TransformError::Error("broken".to_string()));
    }
}
