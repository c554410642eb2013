//! Interface every code-generation back end implements.
use vgen_ir::Netlist;
use vgen_utils::{OutputFile, Result};

/// A back end turning a validated netlist into artifacts written to disk.
pub trait Backend {
    /// The name of this backend, used in CLI help and log messages.
    fn name(&self) -> &'static str;
    /// Validates the netlist's structural invariants before any output is
    /// produced. Returns `Err` if they're violated.
    fn validate(netlist: &Netlist) -> Result<()>;
    /// Transforms the netlist into its textual form and writes it to
    /// `file`.
    fn emit(netlist: &Netlist, name: &str, file: &mut OutputFile) -> Result<()>;
    /// Validates, then emits.
    fn run(&self, netlist: &Netlist, name: &str, mut file: OutputFile) -> Result<()> {
        Self::validate(netlist)?;
        Self::emit(netlist, name, &mut file)
    }
}
