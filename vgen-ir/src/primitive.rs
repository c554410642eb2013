//! The closed taxonomy of hardware primitives a netlist can be built from.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Bit width of a signal. Widths are always known statically.
pub type Width = u64;

/// One item of a [`Primitive::Display`] format schema: either a literal
/// string segment, or a slot that consumes the next data input of the given
/// width. Built with [`DisplayArgsBuilder`] rather than accumulated
/// ad-hoc, so elaboration hands the generator an explicit, ordered value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayArg {
    Str(String),
    Bit(Width),
}

/// Builder for [`Display`](Primitive::Display) argument schemas.
///
/// ```
/// use vgen_ir::DisplayArgsBuilder;
/// let schema = DisplayArgsBuilder::new().str("x=").bit(8).build();
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Default)]
pub struct DisplayArgsBuilder {
    items: Vec<DisplayArg>,
}

impl DisplayArgsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn str(mut self, s: impl Into<String>) -> Self {
        self.items.push(DisplayArg::Str(s.into()));
        self
    }

    pub fn bit(mut self, width: Width) -> Self {
        self.items.push(DisplayArg::Bit(width));
        self
    }

    pub fn build(self) -> Vec<DisplayArg> {
        self.items
    }
}

/// A named, width-typed signature for one port of a [`Primitive::Custom`]
/// black box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub name: String,
    pub width: Width,
}

impl Signal {
    pub fn new(name: impl Into<String>, width: Width) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// The tagged variant enumerating every supported hardware operator. See
/// the primitive table in the top-level design notes for arities and
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Add(Width),
    Sub(Width),
    Mul(Width),
    Div(Width),
    Mod(Width),
    And(Width),
    Or(Width),
    Xor(Width),
    Not(Width),
    ShiftLeft(Width),
    ShiftRight(Width),
    ArithShiftRight(Width),
    Equal(Width),
    NotEqual(Width),
    LessThan(Width),
    LessThanEq(Width),
    ReplicateBit(Width),
    ZeroExtend {
        in_width: Width,
        out_width: Width,
    },
    SignExtend {
        in_width: Width,
        out_width: Width,
    },
    SelectBits {
        width: Width,
        hi: Width,
        lo: Width,
    },
    Concat {
        width_a: Width,
        width_b: Width,
    },
    Mux(Width),
    CountOnes(Width),
    Identity(Width),
    Const {
        width: Width,
        value: u64,
    },
    DontCare(Width),
    Register {
        init: u64,
        width: Width,
    },
    RegisterEn {
        init: u64,
        width: Width,
    },
    BRAM {
        init_file: Option<String>,
        addr_width: Width,
        data_width: Width,
    },
    TrueDualBRAM {
        init_file: Option<String>,
        addr_width: Width,
        data_width: Width,
    },
    Display(Vec<DisplayArg>),
    Finish,
    TestPlusArgs(String),
    Input {
        width: Width,
        name: String,
    },
    Output {
        width: Width,
        name: String,
    },
    RegFileMake {
        init_file: Option<String>,
        addr_width: Width,
        data_width: Width,
        id: u64,
    },
    RegFileRead {
        width: Width,
        id: u64,
    },
    RegFileWrite {
        addr_width: Width,
        data_width: Width,
        id: u64,
    },
    Custom {
        name: String,
        in_sigs: Vec<Signal>,
        out_sigs: Vec<Signal>,
        params: Vec<(String, u64)>,
        clocked: bool,
    },
}

impl Primitive {
    /// Short tag for error messages and declaration comments.
    pub fn tag(&self) -> String {
        use Primitive::*;
        match self {
            Add(..) => "Add".into(),
            Sub(..) => "Sub".into(),
            Mul(..) => "Mul".into(),
            Div(..) => "Div".into(),
            Mod(..) => "Mod".into(),
            And(..) => "And".into(),
            Or(..) => "Or".into(),
            Xor(..) => "Xor".into(),
            Not(..) => "Not".into(),
            ShiftLeft(..) => "ShiftLeft".into(),
            ShiftRight(..) => "ShiftRight".into(),
            ArithShiftRight(..) => "ArithShiftRight".into(),
            Equal(..) => "Equal".into(),
            NotEqual(..) => "NotEqual".into(),
            LessThan(..) => "LessThan".into(),
            LessThanEq(..) => "LessThanEq".into(),
            ReplicateBit(..) => "ReplicateBit".into(),
            ZeroExtend { .. } => "ZeroExtend".into(),
            SignExtend { .. } => "SignExtend".into(),
            SelectBits { .. } => "SelectBits".into(),
            Concat { .. } => "Concat".into(),
            Mux(..) => "Mux".into(),
            CountOnes(..) => "CountOnes".into(),
            Identity(..) => "Identity".into(),
            Const { .. } => "Const".into(),
            DontCare(..) => "DontCare".into(),
            Register { .. } => "Register".into(),
            RegisterEn { .. } => "RegisterEn".into(),
            BRAM { .. } => "BRAM".into(),
            TrueDualBRAM { .. } => "TrueDualBRAM".into(),
            Display(..) => "Display".into(),
            Finish => "Finish".into(),
            TestPlusArgs(..) => "TestPlusArgs".into(),
            Input { .. } => "Input".into(),
            Output { .. } => "Output".into(),
            RegFileMake { .. } => "RegFileMake".into(),
            RegFileRead { .. } => "RegFileRead".into(),
            RegFileWrite { .. } => "RegFileWrite".into(),
            Custom { name, .. } => format!("Custom({name})"),
        }
    }

    /// The expected shape of each input, in order: `Some(w)` asserts an
    /// exact width, `None` means only presence is checked (used for
    /// `RegFileRead`'s address input, whose width is owned by the
    /// `RegFileMake` it refers to, not by this primitive).
    pub fn input_shape(&self) -> SmallVec<[Option<Width>; 6]> {
        use Primitive::*;
        match self {
            Add(w) | Sub(w) | Mul(w) | Div(w) | Mod(w) | And(w) | Or(w)
            | Xor(w) | ShiftLeft(w) | ShiftRight(w) | ArithShiftRight(w)
            | Equal(w) | NotEqual(w) | LessThan(w) | LessThanEq(w) => {
                SmallVec::from_slice(&[Some(*w), Some(*w)])
            }
            Not(w) | CountOnes(w) | Identity(w) => SmallVec::from_slice(&[Some(*w)]),
            // The driver is a single bit; `{w{x}}` repeats it w times to
            // produce the w-bit output `output_widths()` declares.
            ReplicateBit(..) => SmallVec::from_slice(&[Some(1)]),
            ZeroExtend { in_width, .. } | SignExtend { in_width, .. } => {
                SmallVec::from_slice(&[Some(*in_width)])
            }
            SelectBits { width, .. } => SmallVec::from_slice(&[Some(*width)]),
            Concat { width_a, width_b } => {
                SmallVec::from_slice(&[Some(*width_a), Some(*width_b)])
            }
            Mux(w) => SmallVec::from_slice(&[Some(1), Some(*w), Some(*w)]),
            Const { .. } | DontCare(..) | TestPlusArgs(..) | Input { .. }
            | RegFileMake { .. } => SmallVec::new(),
            Register { width, .. } => SmallVec::from_slice(&[Some(*width)]),
            RegisterEn { width, .. } => {
                SmallVec::from_slice(&[Some(1), Some(*width)])
            }
            BRAM {
                addr_width,
                data_width,
                ..
            } => SmallVec::from_slice(&[
                Some(*addr_width),
                Some(*data_width),
                Some(1),
            ]),
            TrueDualBRAM {
                addr_width,
                data_width,
                ..
            } => SmallVec::from_slice(&[
                Some(*addr_width),
                Some(*data_width),
                Some(1),
                Some(*addr_width),
                Some(*data_width),
                Some(1),
            ]),
            Display(schema) => {
                let mut v = SmallVec::new();
                v.push(Some(1));
                for item in schema {
                    if let DisplayArg::Bit(w) = item {
                        v.push(Some(*w));
                    }
                }
                v
            }
            Finish => SmallVec::from_slice(&[Some(1)]),
            Output { width, .. } => SmallVec::from_slice(&[Some(*width)]),
            RegFileRead { .. } => SmallVec::from_slice(&[None]),
            RegFileWrite {
                addr_width,
                data_width,
                ..
            } => SmallVec::from_slice(&[
                Some(1),
                Some(*addr_width),
                Some(*data_width),
            ]),
            Custom { in_sigs, .. } => {
                in_sigs.iter().map(|s| Some(s.width)).collect()
            }
        }
    }

    /// Widths of every output port, in order.
    pub fn output_widths(&self) -> SmallVec<[Width; 2]> {
        use Primitive::*;
        match self {
            Add(w) | Sub(w) | Mul(w) | Div(w) | Mod(w) | And(w) | Or(w)
            | Xor(w) | Not(w) | ShiftLeft(w) | ShiftRight(w)
            | ArithShiftRight(w) | ReplicateBit(w) | Mux(w)
            | CountOnes(w) | Identity(w) | DontCare(w) => {
                SmallVec::from_slice(&[*w])
            }
            Equal(..) | NotEqual(..) | LessThan(..) | LessThanEq(..) => {
                SmallVec::from_slice(&[1])
            }
            ZeroExtend { out_width, .. } | SignExtend { out_width, .. } => {
                SmallVec::from_slice(&[*out_width])
            }
            SelectBits { hi, lo, .. } => SmallVec::from_slice(&[hi - lo + 1]),
            Concat { width_a, width_b } => {
                SmallVec::from_slice(&[width_a + width_b])
            }
            Const { width, .. } => SmallVec::from_slice(&[*width]),
            Register { width, .. } | RegisterEn { width, .. } => {
                SmallVec::from_slice(&[*width])
            }
            BRAM { data_width, .. } => SmallVec::from_slice(&[*data_width]),
            TrueDualBRAM { data_width, .. } => {
                SmallVec::from_slice(&[*data_width, *data_width])
            }
            Display(..) | Finish | Output { .. } | RegFileMake { .. }
            | RegFileWrite { .. } => SmallVec::new(),
            TestPlusArgs(..) => SmallVec::from_slice(&[1]),
            Input { width, .. } => SmallVec::from_slice(&[*width]),
            RegFileRead { width, .. } => SmallVec::from_slice(&[*width]),
            Custom { out_sigs, .. } => {
                out_sigs.iter().map(|s| s.width).collect()
            }
        }
    }

    /// `true` for the primitives the expression printer is allowed to
    /// render inline inside an enclosing expression, rather than
    /// materialise as a named wire. The set is exactly the primitives whose
    /// Verilog syntax is self-delimiting: unary, brace-bracketed, indexed,
    /// or a function call.
    pub fn is_inlinable(&self) -> bool {
        use Primitive::*;
        matches!(
            self,
            Const { .. }
                | DontCare(..)
                | Not(..)
                | ReplicateBit(..)
                | ZeroExtend { .. }
                | SignExtend { .. }
                | SelectBits { .. }
                | Concat { .. }
                | CountOnes(..)
                | Identity(..)
        )
    }

    /// `true` if this primitive contributes to the clocked always-block
    /// (either a statement inside it, or -- for `BRAM`/`TrueDualBRAM` -- an
    /// instance with a `.CLK(clock)` connection).
    pub fn is_clocked(&self) -> bool {
        use Primitive::*;
        matches!(
            self,
            Register { .. }
                | RegisterEn { .. }
                | BRAM { .. }
                | TrueDualBRAM { .. }
                | Display(..)
                | Finish
                | RegFileWrite { .. }
        ) || matches!(self, Custom { clocked: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replicate_bit_takes_a_single_bit_driver() {
        let prim = Primitive::ReplicateBit(8);
        assert_eq!(prim.input_shape().as_slice(), &[Some(1)]);
        assert_eq!(prim.output_widths().as_slice(), &[8]);
    }

    #[test]
    fn is_clocked_covers_registers_memories_and_sim_only_statements() {
        assert!(Primitive::Register { init: 0, width: 4 }.is_clocked());
        assert!(Primitive::RegisterEn { init: 0, width: 4 }.is_clocked());
        assert!(Primitive::BRAM {
            init_file: None,
            addr_width: 4,
            data_width: 8
        }
        .is_clocked());
        assert!(Primitive::Finish.is_clocked());
        assert!(!Primitive::Add(8).is_clocked());
    }

    #[test]
    fn custom_is_clocked_only_when_flagged() {
        let clocked = Primitive::Custom {
            name: "mbox".into(),
            in_sigs: vec![],
            out_sigs: vec![],
            params: vec![],
            clocked: true,
        };
        let unclocked = Primitive::Custom {
            name: "mbox".into(),
            in_sigs: vec![],
            out_sigs: vec![],
            params: vec![],
            clocked: false,
        };
        assert!(clocked.is_clocked());
        assert!(!unclocked.is_clocked());
    }
}
