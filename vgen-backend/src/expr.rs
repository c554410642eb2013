//! Converts a [`NetInput`] into a Verilog expression with correct
//! parenthesisation. A recursive function over the net-input tree; the only
//! state it touches is the netlist itself, to resolve `Wire` references and
//! their name hints.
use vast::v17::ast::Expr;
use vgen_ir::{InstId, Net, NetInput, Netlist, Primitive};
use vgen_utils::{wire_name, Error, Result};

/// The expression referring to one output port of a previously materialised
/// net. `Input` is a special case: its own declared name already is a
/// module port, so references use it directly rather than the id-based
/// `hint_iid_port` scheme every other primitive gets.
pub fn wire_ref(netlist: &Netlist, id: InstId, port: usize) -> Result<Expr> {
    let net = netlist.get(id).ok_or_else(|| {
        Error::malformed_netlist(id.0, format!("Wire references missing net {id}"))
    })?;
    if let Primitive::Input { name, .. } = &net.prim {
        return Ok(Expr::Ref(name.clone()));
    }
    Ok(Expr::Ref(wire_name(&net.name_hints, id.0, port)))
}

/// Renders the expression for a net's own primitive and inputs, as it
/// appears on the right-hand side of that net's `assign` -- never
/// parenthesised, since an assign's RHS needs no enclosing delimiter.
pub fn print_own(netlist: &Netlist, net: &Net) -> Result<Expr> {
    print_tree(netlist, net.id, &net.prim, &net.inputs)
}

/// Wraps `expr` in parentheses, used whenever a `Tree`'s root primitive is
/// not one of the self-delimiting forms in [`Primitive::is_inlinable`].
fn paren(expr: Expr) -> Expr {
    Expr::Ref(format!("({expr})"))
}

/// An unsigned literal `w'hH`: lowercase hex, no leading zeros, no mask.
fn literal(width: u64, value: u64) -> Expr {
    Expr::Ref(format!("{width}'h{value:x}"))
}

/// A don't-care literal `w'bxx..x`.
fn dont_care(width: u64) -> Expr {
    Expr::Ref(format!("{width}'b{}", "x".repeat(width as usize)))
}

/// Renders a net input: either a direct wire reference, or an inlined
/// sub-expression tree, parenthesised unless its root is inlinable.
pub fn print_input(netlist: &Netlist, owner: InstId, input: &NetInput) -> Result<Expr> {
    match input {
        NetInput::Wire(id, port) => wire_ref(netlist, *id, *port),
        NetInput::Tree(prim, children) => {
            let rendered = print_tree(netlist, owner, prim, children)?;
            if prim.is_inlinable() {
                Ok(rendered)
            } else {
                Ok(paren(rendered))
            }
        }
    }
}

fn print_tree(
    netlist: &Netlist,
    owner: InstId,
    prim: &Primitive,
    children: &[NetInput],
) -> Result<Expr> {
    use Primitive::*;

    // `SelectBits` inspects its single child's shape directly rather than
    // its printed form, since only `Wire`, `Const`, and `DontCare` roots are
    // legal -- everything else is a fatal `UnsupportedInline`.
    if let SelectBits { hi, lo, .. } = prim {
        let slice_width = hi - lo + 1;
        return match &children[0] {
            NetInput::Wire(id, port) => {
                let target = wire_ref(netlist, *id, *port)?;
                Ok(Expr::Ref(format!("{target}[{hi}:{lo}]")))
            }
            NetInput::Tree(Const { value, .. }, _) => {
                let folded = (value >> lo) & ((1u64 << slice_width) - 1);
                Ok(literal(slice_width, folded))
            }
            NetInput::Tree(DontCare(_), _) => Ok(dont_care(slice_width)),
            NetInput::Tree(other, _) => Err(Error::unsupported_inline(
                owner.0,
                format!("SelectBits over non-constant sub-expression `{}`", other.tag()),
            )),
        };
    }

    let args = children
        .iter()
        .map(|c| print_input(netlist, owner, c))
        .collect::<Result<Vec<_>>>()?;

    match prim {
        Const { width, value } => Ok(literal(*width, *value)),
        DontCare(width) => Ok(dont_care(*width)),
        Add(_) => Ok(Expr::Ref(format!("{} + {}", args[0], args[1]))),
        Sub(_) => Ok(Expr::Ref(format!("{} - {}", args[0], args[1]))),
        Mul(_) => Ok(Expr::Ref(format!("{} * {}", args[0], args[1]))),
        Div(_) => Ok(Expr::Ref(format!("{} / {}", args[0], args[1]))),
        Mod(_) => Ok(Expr::Ref(format!("{} % {}", args[0], args[1]))),
        And(_) => Ok(Expr::new_bit_and(args[0].clone(), args[1].clone())),
        Or(_) => Ok(Expr::new_bit_or(args[0].clone(), args[1].clone())),
        Xor(_) => Ok(Expr::Ref(format!("{} ^ {}", args[0], args[1]))),
        Not(_) => Ok(Expr::new_not(args[0].clone())),
        ShiftLeft(_) => Ok(Expr::Ref(format!("{} << {}", args[0], args[1]))),
        ShiftRight(_) => Ok(Expr::Ref(format!("{} >> {}", args[0], args[1]))),
        ArithShiftRight(_) => {
            Ok(Expr::Ref(format!("$signed({}) >>> {}", args[0], args[1])))
        }
        Equal(_) => Ok(Expr::new_eq(args[0].clone(), args[1].clone())),
        NotEqual(_) => Ok(Expr::new_neq(args[0].clone(), args[1].clone())),
        LessThan(_) => Ok(Expr::new_lt(args[0].clone(), args[1].clone())),
        LessThanEq(_) => Ok(Expr::new_leq(args[0].clone(), args[1].clone())),
        ReplicateBit(w) => Ok(Expr::Ref(format!("{{{w}{{{}}}}}", args[0]))),
        ZeroExtend {
            in_width,
            out_width,
        } => {
            let pad = out_width - in_width;
            Ok(Expr::Ref(format!("{{{{{pad}{{1'b0}}}}, {}}}", args[0])))
        }
        SignExtend {
            in_width,
            out_width,
        } => {
            let pad = out_width - in_width;
            let sign_bit = in_width - 1;
            Ok(Expr::Ref(format!(
                "{{{{{pad}{{{}[{sign_bit}]}}}}, {}}}",
                args[0], args[0]
            )))
        }
        SelectBits { .. } => unreachable!("handled above"),
        Concat { .. } => Ok(Expr::Ref(format!("{{{}, {}}}", args[0], args[1]))),
        Mux(_) => Ok(Expr::new_mux(args[0].clone(), args[1].clone(), args[2].clone())),
        CountOnes(_) => Ok(Expr::Ref(format!("$countones({})", args[0]))),
        Identity(_) => Ok(args[0].clone()),
        other => Err(Error::unsupported_primitive(
            owner.0,
            format!("`{}` cannot be inlined into an expression", other.tag()),
        )),
    }
}
