//! Startup failures of the renderer and the navigator.

use std::fmt;

/// Errors that can occur while wiring the page up.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    /// No element with this id (or selector) exists in the document.
    MissingElement(&'static str),
    /// The element exists but is not of the expected type.
    WrongElementType(&'static str),
    /// The canvas refused to hand out the named rendering context.
    NoContext(&'static str),
    /// A shader stage failed to compile; carries the driver log.
    ShaderCompile(String),
    /// The program failed to link; carries the driver log.
    ProgramLink(String),
    /// A GL object (buffer, vertex array, program) could not be created.
    Allocation(&'static str),
    /// The linked program has no active attribute with this name.
    MissingAttribute(&'static str),
    /// The page holds no slides.
    EmptyDeck,
    /// Any other exception thrown by the platform.
    Js(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::MissingElement(what) => write!(f, "element not found: {}", what),
            InitError::WrongElementType(what) => write!(f, "element has the wrong type: {}", what),
            InitError::NoContext(kind) => write!(f, "{} context not supported", kind),
            InitError::ShaderCompile(log) => write!(f, "shader compilation failed: {}", log),
            InitError::ProgramLink(log) => write!(f, "program link failed: {}", log),
            InitError::Allocation(what) => write!(f, "failed to create {}", what),
            InitError::MissingAttribute(name) => write!(f, "attribute not active: {}", name),
            InitError::EmptyDeck => write!(f, "no slides found"),
            InitError::Js(msg) => write!(f, "platform error: {}", msg),
        }
    }
}

impl std::error::Error for InitError {}
