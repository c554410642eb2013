//! Per-net contribution builder: classifies a net by its primitive and
//! produces the lines it contributes to each of the module's four
//! sections.
use crate::expr;
use crate::names;
use itertools::Itertools;
use vgen_ir::{Net, NetInput, Netlist, Primitive};
use vgen_utils::{Error, Result};

/// What one net contributes to the module skeleton. Plain `Vec<String>`
/// rather than four `Option`s, since a handful of primitives (`BRAM`'s
/// output wires, `RegFileMake`'s optional `$readmemh`) contribute more than
/// one line to a section.
#[derive(Debug, Default, Clone)]
pub struct Contribution {
    pub decl: Vec<String>,
    pub inst: Vec<String>,
    pub always: Vec<String>,
    pub reset: Vec<String>,
}

impl Contribution {
    fn decl(line: impl Into<String>) -> Self {
        Self {
            decl: vec![line.into()],
            ..Default::default()
        }
    }
}

/// The set of primitives materialised as `wire [w-1:0] name;` plus a
/// continuous `assign name = <expr>;` -- every pure-combinational primitive
/// except `Const`/`DontCare`, which fold their value into the declaration
/// itself and need no separate driver.
fn is_plain_combinational(prim: &Primitive) -> bool {
    use Primitive::*;
    matches!(
        prim,
        Add(_)
            | Sub(_)
            | Mul(_)
            | Div(_)
            | Mod(_)
            | And(_)
            | Or(_)
            | Xor(_)
            | Not(_)
            | ShiftLeft(_)
            | ShiftRight(_)
            | ArithShiftRight(_)
            | Equal(_)
            | NotEqual(_)
            | LessThan(_)
            | LessThanEq(_)
            | ReplicateBit(_)
            | ZeroExtend { .. }
            | SignExtend { .. }
            | SelectBits { .. }
            | Concat { .. }
            | Mux(_)
            | CountOnes(_)
            | Identity(_)
    )
}

/// Builds the full set of contributions for one net.
pub fn build(netlist: &Netlist, net: &Net) -> Result<Contribution> {
    use Primitive::*;

    let width = |idx: usize| -> u64 {
        net.prim.output_widths().get(idx).copied().unwrap_or(0)
    };
    let name = |idx: usize| names::output_name(net, idx);

    if is_plain_combinational(&net.prim) {
        let w = width(0);
        let n = name(0);
        let expr = expr::print_own(netlist, net)?;
        return Ok(Contribution {
            decl: vec![format!("wire [{}:0] {n};", w.saturating_sub(1))],
            inst: vec![format!("assign {n} = {expr};")],
            ..Default::default()
        });
    }

    match &net.prim {
        Const { width, value } => Ok(Contribution::decl(format!(
            "wire [{}:0] {} = {width}'h{value:x};",
            width.saturating_sub(1),
            name(0)
        ))),
        DontCare(width) => Ok(Contribution::decl(format!(
            "wire [{}:0] {} = {width}'b{};",
            width.saturating_sub(1),
            name(0),
            "x".repeat(*width as usize)
        ))),
        Register { init, width } => {
            let n = name(0);
            let d = expr::print_input(netlist, net.id, &net.inputs[0])?;
            Ok(Contribution {
                decl: vec![format!("reg [{}:0] {n} = {width}'h{init:x};", width.saturating_sub(1))],
                always: vec![format!("{n} <= {d};")],
                reset: vec![format!("{n} <= {width}'h{init:x};")],
                ..Default::default()
            })
        }
        RegisterEn { init, width } => {
            let n = name(0);
            let en = expr::print_input(netlist, net.id, &net.inputs[0])?;
            let d = expr::print_input(netlist, net.id, &net.inputs[1])?;
            Ok(Contribution {
                decl: vec![format!("reg [{}:0] {n} = {width}'h{init:x};", width.saturating_sub(1))],
                always: vec![format!("if ({en} == 1) {n} <= {d};")],
                reset: vec![format!("{n} <= {width}'h{init:x};")],
                ..Default::default()
            })
        }
        BRAM {
            init_file,
            addr_width,
            data_width,
        } => {
            let n = name(0);
            let addr = expr::print_input(netlist, net.id, &net.inputs[0])?;
            let di = expr::print_input(netlist, net.id, &net.inputs[1])?;
            let we = expr::print_input(netlist, net.id, &net.inputs[2])?;
            let init = init_file
                .as_deref()
                .map(|f| format!("\"{f}\""))
                .unwrap_or_else(|| "\"UNUSED\"".to_string());
            Ok(Contribution {
                decl: vec![format!("wire [{}:0] {n};", data_width.saturating_sub(1))],
                inst: vec![format!(
                    "BlockRAM #(.INIT_FILE({init}), .ADDR_WIDTH({addr_width}), .DATA_WIDTH({data_width})) {n}_inst (.CLK(clock), .DI({di}), .ADDR({addr}), .WE({we}), .DO({n}));"
                )],
                ..Default::default()
            })
        }
        TrueDualBRAM {
            init_file,
            addr_width,
            data_width,
        } => {
            let n0 = name(0);
            let n1 = name(1);
            let addr_a = expr::print_input(netlist, net.id, &net.inputs[0])?;
            let di_a = expr::print_input(netlist, net.id, &net.inputs[1])?;
            let we_a = expr::print_input(netlist, net.id, &net.inputs[2])?;
            let addr_b = expr::print_input(netlist, net.id, &net.inputs[3])?;
            let di_b = expr::print_input(netlist, net.id, &net.inputs[4])?;
            let we_b = expr::print_input(netlist, net.id, &net.inputs[5])?;
            let init = init_file
                .as_deref()
                .map(|f| format!("\"{f}\""))
                .unwrap_or_else(|| "\"UNUSED\"".to_string());
            Ok(Contribution {
                decl: vec![
                    format!("wire [{}:0] {n0};", data_width.saturating_sub(1)),
                    format!("wire [{}:0] {n1};", data_width.saturating_sub(1)),
                ],
                inst: vec![format!(
                    "BlockRAMTrueDual #(.INIT_FILE({init}), .ADDR_WIDTH({addr_width}), .DATA_WIDTH({data_width})) {n0}_inst (.CLK(clock), .ADDRA({addr_a}), .DIA({di_a}), .WEA({we_a}), .DOA({n0}), .ADDRB({addr_b}), .DIB({di_b}), .WEB({we_b}), .DOB({n1}));"
                )],
                ..Default::default()
            })
        }
        Display(schema) => {
            let en = expr::print_input(netlist, net.id, &net.inputs[0])?;
            let mut bit_idx = 1;
            let mut fmt_args = Vec::new();
            for item in schema {
                match item {
                    vgen_ir::DisplayArg::Str(s) => fmt_args.push(format!("\"{s}\"")),
                    vgen_ir::DisplayArg::Bit(_) => {
                        let e = expr::print_input(netlist, net.id, &net.inputs[bit_idx])?;
                        fmt_args.push(e.to_string());
                        bit_idx += 1;
                    }
                }
            }
            Ok(Contribution {
                always: vec![format!("if ({en} == 1) $write({});", fmt_args.join(", "))],
                ..Default::default()
            })
        }
        Finish => {
            let en = expr::print_input(netlist, net.id, &net.inputs[0])?;
            Ok(Contribution {
                always: vec![format!("if ({en} == 1) $finish;")],
                ..Default::default()
            })
        }
        TestPlusArgs(s) => Ok(Contribution {
            decl: vec![format!("wire [0:0] {};", name(0))],
            inst: vec![format!(
                "assign {} = $test$plusargs(\"{s}\") == 0 ? 0 : 1;",
                name(0)
            )],
            ..Default::default()
        }),
        Input { .. } => Ok(Contribution::default()),
        Output { name: port_name, .. } => {
            let value = expr::print_input(netlist, net.id, &net.inputs[0])?;
            Ok(Contribution {
                inst: vec![format!("assign {port_name} = {value};")],
                ..Default::default()
            })
        }
        RegFileMake {
            init_file,
            addr_width,
            data_width,
            id,
        } => {
            let mut decl = vec![format!(
                "reg [{}:0] rf{id} [{}:0];",
                data_width.saturating_sub(1),
                (1u64 << *addr_width).saturating_sub(1)
            )];
            if let Some(f) = init_file {
                decl.push(format!(
                    "generate initial $readmemh(\"{f}\", rf{id}); endgenerate"
                ));
            }
            Ok(Contribution {
                decl,
                ..Default::default()
            })
        }
        RegFileRead { id, .. } => {
            let addr = expr::print_input(netlist, net.id, &net.inputs[0])?;
            Ok(Contribution {
                inst: vec![format!("assign {} = rf{id}[{addr}];", name(0))],
                ..Default::default()
            })
        }
        RegFileWrite {
            id, ..
        } => {
            let en = expr::print_input(netlist, net.id, &net.inputs[0])?;
            let addr = expr::print_input(netlist, net.id, &net.inputs[1])?;
            let di = expr::print_input(netlist, net.id, &net.inputs[2])?;
            Ok(Contribution {
                always: vec![format!("if ({en} == 1) rf{id}[{addr}] <= {di};")],
                ..Default::default()
            })
        }
        Custom {
            name: prim_name,
            in_sigs,
            out_sigs,
            params,
            ..
        } => {
            if in_sigs.len() != net.inputs.len() {
                return Err(Error::malformed_netlist(
                    net.id.0,
                    format!(
                        "Custom `{prim_name}` declares {} input signal(s) but net has {}",
                        in_sigs.len(),
                        net.inputs.len()
                    ),
                ));
            }
            let decl = out_sigs
                .iter()
                .enumerate()
                .map(|(k, sig)| {
                    format!(
                        "wire [{}:0] {};",
                        sig.width.saturating_sub(1),
                        names::custom_output_name(net, prim_name, k)
                    )
                })
                .collect();

            let mut conns = Vec::new();
            if net.prim.is_clocked() {
                conns.push(".clock(clock)".to_string());
                conns.push(".reset(reset)".to_string());
            }
            for (sig, input) in in_sigs.iter().zip(&net.inputs) {
                let v = expr::print_input(netlist, net.id, input)?;
                conns.push(format!(".{}({v})", sig.name));
            }
            for (k, sig) in out_sigs.iter().enumerate() {
                conns.push(format!(
                    ".{}({})",
                    sig.name,
                    names::custom_output_name(net, prim_name, k)
                ));
            }

            let param_str = if params.is_empty() {
                String::new()
            } else {
                let inner = params.iter().map(|(k, v)| format!(".{k}({v})")).join(", ");
                format!(" #({inner})")
            };

            Ok(Contribution {
                decl,
                inst: vec![format!(
                    "{prim_name}{param_str} {prim_name}_{}({});",
                    net.id.0,
                    conns.join(", ")
                )],
                ..Default::default()
            })
        }
        _ => unreachable!("every remaining primitive is plain-combinational"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_ir::InstId;

    fn nl_with(mut nets: Vec<Net>) -> Netlist {
        let mut nl = Netlist::new();
        for n in nets.drain(..) {
            nl.insert(n);
        }
        nl
    }

    #[test]
    fn adder_gets_decl_and_assign() {
        let a = Net::new(0u64, Primitive::Input { width: 8, name: "a".into() }, vec![]);
        let b = Net::new(1u64, Primitive::Input { width: 8, name: "b".into() }, vec![]);
        let add = Net::new(
            2u64,
            Primitive::Add(8),
            vec![NetInput::Wire(InstId(0), 0), NetInput::Wire(InstId(1), 0)],
        );
        let nl = nl_with(vec![a, b, add.clone()]);
        let c = build(&nl, &add).unwrap();
        assert_eq!(c.decl, vec!["wire [7:0] v_2_0;"]);
        assert_eq!(c.inst, vec!["assign v_2_0 = a + b;"]);
    }

    #[test]
    fn register_en_produces_always_and_reset() {
        let en = Net::new(0u64, Primitive::Const { width: 1, value: 1 }, vec![]);
        let d = Net::new(1u64, Primitive::Const { width: 4, value: 7 }, vec![]);
        let reg = Net::new(
            5u64,
            Primitive::RegisterEn { init: 3, width: 4 },
            vec![NetInput::Wire(InstId(0), 0), NetInput::Wire(InstId(1), 0)],
        );
        let nl = nl_with(vec![en, d, reg.clone()]);
        let c = build(&nl, &reg).unwrap();
        assert_eq!(c.decl, vec!["reg [3:0] v_5_0 = 4'h3;"]);
        assert_eq!(c.always, vec!["if (v_0_0 == 1) v_5_0 <= v_1_0;"]);
        assert_eq!(c.reset, vec!["v_5_0 <= 4'h3;"]);
    }

    #[test]
    fn output_assigns_its_port_directly() {
        let add = Net::new(2u64, Primitive::Const { width: 8, value: 1 }, vec![]);
        let out = Net::new(
            3u64,
            Primitive::Output {
                width: 8,
                name: "y".into(),
            },
            vec![NetInput::Wire(InstId(2), 0)],
        );
        let nl = nl_with(vec![add, out.clone()]);
        let c = build(&nl, &out).unwrap();
        assert!(c.decl.is_empty());
        assert_eq!(c.inst, vec!["assign y = v_2_0;"]);
    }
}
