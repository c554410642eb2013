//! Errors generated by the Verilog code generator.

/// Convenience wrapper to represent success or a meaningful generator error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors generated while validating or lowering a netlist.
#[derive(Clone)]
pub struct Error {
    kind: Box<ErrorKind>,
    post_msg: Option<String>,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(post) = &self.post_msg {
            write!(f, "\n{}", post)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn with_post_msg(mut self, msg: Option<String>) -> Self {
        self.post_msg = msg;
        self
    }

    /// A `Wire` referenced a missing instance, or a primitive's inputs don't
    /// match its declared arity/width.
    pub fn malformed_netlist<S: ToString>(inst: u64, msg: S) -> Self {
        Self {
            kind: Box::new(ErrorKind::MalformedNetlist(inst, msg.to_string())),
            post_msg: None,
        }
    }

    /// `SelectBits` applied to a `Tree` whose root isn't `Const`, `DontCare`,
    /// or a `Wire`.
    pub fn unsupported_inline<S: ToString>(inst: u64, msg: S) -> Self {
        Self {
            kind: Box::new(ErrorKind::UnsupportedInline(
                inst,
                msg.to_string(),
            )),
            post_msg: None,
        }
    }

    /// An extension primitive outside the closed set reached the printer.
    pub fn unsupported_primitive<S: ToString>(inst: u64, msg: S) -> Self {
        Self {
            kind: Box::new(ErrorKind::UnsupportedPrimitive(
                inst,
                msg.to_string(),
            )),
            post_msg: None,
        }
    }

    /// Directory creation or file write failed.
    pub fn io_failure<S: ToString>(msg: S) -> Self {
        Self {
            kind: Box::new(ErrorKind::IoFailure(msg.to_string())),
            post_msg: None,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

#[derive(Clone)]
enum ErrorKind {
    MalformedNetlist(u64, String),
    UnsupportedInline(u64, String),
    UnsupportedPrimitive(u64, String),
    IoFailure(String),
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorKind::*;
        match self {
            MalformedNetlist(inst, msg) => {
                write!(f, "[net {inst}] malformed netlist: {msg}")
            }
            UnsupportedInline(inst, msg) => {
                write!(f, "[net {inst}] cannot inline: {msg}")
            }
            UnsupportedPrimitive(inst, msg) => {
                write!(f, "[net {inst}] unsupported primitive: {msg}")
            }
            IoFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io_failure(format!("IO error: {e}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::io_failure(format!("serde_json error: {e}"))
    }
}
