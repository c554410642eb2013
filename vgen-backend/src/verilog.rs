//! Verilog backend: turns a validated [`Netlist`] into a single Verilog
//! module.
use crate::module;
use crate::traits::Backend;
use std::io::Write;
use std::time::Instant;
use vgen_ir::Netlist;
use vgen_utils::{OutputFile, Result};

/// Emits one Verilog module per netlist. The only backend this workspace
/// implements -- there is no multi-component hierarchy to walk, unlike a
/// full compiler's output, since a netlist already denotes exactly one
/// module's worth of structure.
#[derive(Default)]
pub struct VerilogBackend;

impl Backend for VerilogBackend {
    fn name(&self) -> &'static str {
        "verilog"
    }

    fn validate(netlist: &Netlist) -> Result<()> {
        netlist.validate()
    }

    fn emit(netlist: &Netlist, name: &str, file: &mut OutputFile) -> Result<()> {
        let start = Instant::now();
        let text = module::emit_module(netlist, name)?;
        log::info!("Generated `{name}` in {:?}", start.elapsed());
        file.get_write().write_all(text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_ir::{DisplayArgsBuilder, InstId, Net, NetInput, Primitive, Signal};

    fn render(netlist: &Netlist, name: &str) -> String {
        module::emit_module(netlist, name).unwrap()
    }

    #[test]
    fn scenario_1_pure_adder() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Input { width: 8, name: "a".into() }, vec![]));
        nl.insert(Net::new(1u64, Primitive::Input { width: 8, name: "b".into() }, vec![]));
        nl.insert(Net::new(
            2u64,
            Primitive::Add(8),
            vec![NetInput::Wire(InstId(0), 0), NetInput::Wire(InstId(1), 0)],
        ));
        nl.insert(Net::new(
            3u64,
            Primitive::Output { width: 8, name: "y".into() },
            vec![NetInput::Wire(InstId(2), 0)],
        ));

        VerilogBackend::validate(&nl).unwrap();
        let out = render(&nl, "M");
        assert!(out.contains(
            "module M(input wire clock, input wire reset, input wire [7:0] a, input wire [7:0] b, output wire [7:0] y);"
        ));
        assert!(out.contains("assign v_2_0 = a + b;"));
        assert!(out.contains("assign y = v_2_0;"));
    }

    #[test]
    fn scenario_2_select_bits_constant_fold() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(
            0u64,
            Primitive::SelectBits {
                width: 16,
                hi: 7,
                lo: 4,
            },
            vec![NetInput::Tree(
                Primitive::Const {
                    width: 16,
                    value: 0xABCD,
                },
                vec![],
            )],
        ));
        let out = render(&nl, "M");
        assert!(out.contains("4'hc"));
    }

    #[test]
    fn scenario_3_enabled_register_with_reset() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Const { width: 1, value: 1 }, vec![]));
        nl.insert(Net::new(1u64, Primitive::Const { width: 4, value: 9 }, vec![]));
        nl.insert(Net::new(
            5u64,
            Primitive::RegisterEn { init: 3, width: 4 },
            vec![NetInput::Wire(InstId(0), 0), NetInput::Wire(InstId(1), 0)],
        ));
        let out = render(&nl, "M");
        assert!(out.contains("reg [3:0] v_5_0 = 4'h3;"));
        assert!(out.contains("if (v_0_0 == 1) v_5_0 <= v_1_0;"));
        assert!(out.contains("v_5_0 <= 4'h3;"));
    }

    #[test]
    fn scenario_4_true_dual_bram() {
        let mut nl = Netlist::new();
        for i in 0..6u64 {
            nl.insert(Net::new(i, Primitive::Const { width: 32, value: 0 }, vec![]));
        }
        nl.insert(Net::new(
            9u64,
            Primitive::TrueDualBRAM {
                init_file: Some("boot.hex".into()),
                addr_width: 10,
                data_width: 32,
            },
            (0..6).map(|i| NetInput::Wire(InstId(i), 0)).collect(),
        ));
        let out = render(&nl, "M");
        assert!(out.contains("wire [31:0] v_9_0;"));
        assert!(out.contains("wire [31:0] v_9_1;"));
        assert!(out.contains("BlockRAMTrueDual"));
        assert!(out.contains(".DOA(v_9_0)"));
        assert!(out.contains(".DOB(v_9_1)"));
    }

    #[test]
    fn scenario_5_display() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Const { width: 1, value: 1 }, vec![]));
        nl.insert(Net::new(1u64, Primitive::Const { width: 8, value: 5 }, vec![]));
        let schema = DisplayArgsBuilder::new().str("x=").bit(8).build();
        nl.insert(Net::new(
            2u64,
            Primitive::Display(schema),
            vec![NetInput::Wire(InstId(0), 0), NetInput::Wire(InstId(1), 0)],
        ));
        let out = render(&nl, "M");
        assert!(out.contains("if (v_0_0 == 1) $write(\"x=\", v_1_0);"));
    }

    #[test]
    fn scenario_6_input_deduplication() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Input { width: 1, name: "clk_en".into() }, vec![]));
        nl.insert(Net::new(1u64, Primitive::Input { width: 1, name: "clk_en".into() }, vec![]));
        let out = render(&nl, "M");
        assert_eq!(out.matches("clk_en").count(), 1);
    }

    #[test]
    fn custom_black_box_instantiation() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Const { width: 8, value: 1 }, vec![]));
        nl.insert(Net::new(
            1u64,
            Primitive::Custom {
                name: "mbox".into(),
                in_sigs: vec![Signal::new("din", 8)],
                out_sigs: vec![Signal::new("dout", 8)],
                params: vec![("WIDTH".into(), 8)],
                clocked: true,
            },
            vec![NetInput::Wire(InstId(0), 0)],
        ));
        let out = render(&nl, "M");
        assert!(out.contains("mbox #(.WIDTH(8)) mbox_1(.clock(clock), .reset(reset), .din(v_0_0), .dout(mbox_1_0));"));
    }

    #[test]
    fn malformed_netlist_is_rejected() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(
            0u64,
            Primitive::Not(4),
            vec![NetInput::Wire(InstId(99), 0)],
        ));
        assert!(VerilogBackend::validate(&nl).is_err());
    }
}
