//! Assembles the fixed module skeleton from the contributions of every net,
//! in ascending instance-id order.
use crate::contrib;
use vgen_ir::Netlist;
use vgen_utils::Result;

const SEPARATOR_LEN: usize = 78;

fn section_header(label: &str) -> String {
    format!("  // {label}\n  {}", "/".repeat(SEPARATOR_LEN))
}

fn port_list(netlist: &Netlist) -> String {
    let mut ports = vec!["input wire clock".to_string(), "input wire reset".to_string()];
    for (width, name) in netlist.inputs() {
        ports.push(format!("input wire [{}:0] {name}", width.saturating_sub(1)));
    }
    for (width, name) in netlist.outputs() {
        ports.push(format!("output wire [{}:0] {name}", width.saturating_sub(1)));
    }
    ports.join(", ")
}

/// Renders `netlist` as a single Verilog module named `name`.
pub fn emit_module(netlist: &Netlist, name: &str) -> Result<String> {
    let mut decls = Vec::new();
    let mut insts = Vec::new();
    let mut always = Vec::new();
    let mut resets = Vec::new();

    for net in netlist.iter() {
        let c = contrib::build(netlist, net)?;
        decls.extend(c.decl);
        insts.extend(c.inst);
        always.extend(c.always);
        resets.extend(c.reset);
    }

    log::debug!("{name}: {} nets, {} always statements", netlist.len(), always.len());

    let mut out = String::new();
    out.push_str(&format!("module {name}({});\n", port_list(netlist)));
    out.push_str(&section_header("Declarations"));
    out.push('\n');
    for line in &decls {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&section_header("Instances"));
    out.push('\n');
    for line in &insts {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&section_header("Always block"));
    out.push('\n');
    out.push_str("  always @(posedge clock) begin\n");
    out.push_str("    if (reset) begin\n");
    for line in &resets {
        out.push_str("      ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    end else begin\n");
    for line in &always {
        out.push_str("      ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("    end\n");
    out.push_str("  end\n");
    out.push_str("endmodule\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_ir::{InstId, Net, NetInput, Primitive};

    #[test]
    fn pure_adder_matches_the_expected_fragments() {
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

        let out = emit_module(&nl, "M").unwrap();
        assert!(out.contains(
            "module M(input wire clock, input wire reset, input wire [7:0] a, input wire [7:0] b, output wire [7:0] y);"
        ));
        assert!(out.contains("assign v_2_0 = a + b;"));
        assert!(out.contains("assign y = v_2_0;"));
    }

    #[test]
    fn input_deduplication_collapses_to_one_port() {
        let mut nl = Netlist::new();
        nl.insert(Net::new(0u64, Primitive::Input { width: 1, name: "clk_en".into() }, vec![]));
        nl.insert(Net::new(1u64, Primitive::Input { width: 1, name: "clk_en".into() }, vec![]));
        let out = emit_module(&nl, "M").unwrap();
        assert_eq!(out.matches("clk_en").count(), 1);
    }
}
