//! The fixed simulation-driver artifacts written alongside a top-level
//! module: a Verilator C++ harness, its Make rule, and the top-level
//! `Makefile` that includes it. Pure templates -- boilerplate with two
//! substitutions, documented bit-exactly rather than derived from the
//! netlist.
use std::io::Write;
use vgen_utils::{OutputFile, Result};

fn cpp_harness(mod_name: &str) -> String {
    format!(
        r#"#include "V{mod_name}.h"
#include "verilated.h"

static vluint64_t main_time = 0;

double sc_time_stamp() {{
  return main_time;
}}

int main(int argc, char** argv) {{
  Verilated::commandArgs(argc, argv);
  V{mod_name}* top = new V{mod_name};

  while (!Verilated::gotFinish()) {{
    top->clock = 0;
    top->eval();
    top->clock = 1;
    top->eval();
    main_time++;
  }}

  top->final();
  delete top;
  return 0;
}}
"#
    )
}

fn mk_rule(mod_name: &str, blarney_root: &str) -> String {
    format!(
        r#"all: {mod_name}

{mod_name}: *.v *.cpp
	verilator -cc {mod_name}.v -exe {mod_name}.cpp -o {mod_name} -Wno-UNSIGNED -y {blarney_root}/Verilog --x-assign unique --x-initial unique
	make -C obj_dir -j -f V{mod_name}.mk {mod_name}
	cp obj_dir/{mod_name} .
	rm -rf obj_dir

clean-{mod_name}:
	rm -f {mod_name}
"#
    )
}

const TOP_MAKEFILE: &str = "include *.mk\n";

/// Writes the three harness artifacts (`<mod>.cpp`, `<mod>.mk`, `Makefile`)
/// into `dir`. The fourth artifact, `<mod>.v`, is produced separately by
/// [`crate::verilog::VerilogBackend`].
pub fn emit_harness(dir: &std::path::Path, mod_name: &str, blarney_root: &str) -> Result<()> {
    let mut cpp = OutputFile::file(dir.join(format!("{mod_name}.cpp")));
    cpp.get_write().write_all(cpp_harness(mod_name).as_bytes())?;

    let mut mk = OutputFile::file(dir.join(format!("{mod_name}.mk")));
    mk.get_write().write_all(mk_rule(mod_name, blarney_root).as_bytes())?;

    let mut makefile = OutputFile::file(dir.join("Makefile"));
    makefile.get_write().write_all(TOP_MAKEFILE.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpp_harness_toggles_clock_around_eval() {
        let text = cpp_harness("Counter");
        assert!(text.contains("#include \"VCounter.h\""));
        assert!(text.contains("top->clock = 0;"));
        assert!(text.contains("top->clock = 1;"));
        assert!(text.contains("main_time++;"));
        assert!(text.contains("top->final();"));
    }

    #[test]
    fn mk_rule_chains_verilator_then_make_then_copy() {
        let text = mk_rule("Counter", "/opt/blarney");
        assert!(text.contains("verilator -cc Counter.v -exe Counter.cpp -o Counter"));
        assert!(text.contains("-y /opt/blarney/Verilog --x-assign unique --x-initial unique"));
        assert!(text.contains("make -C obj_dir -j -f VCounter.mk Counter"));
        assert!(text.contains("cp obj_dir/Counter ."));
        assert!(text.contains("rm -rf obj_dir"));
        assert!(text.contains("clean-Counter:"));
    }

    #[test]
    fn top_makefile_is_a_single_include_line() {
        assert_eq!(TOP_MAKEFILE, "include *.mk\n");
    }
}
