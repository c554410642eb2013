//! Command-line entry point: reads a JSON-encoded netlist and lowers it to
//! Verilog, optionally alongside a Verilator simulation harness.
use argh::FromArgs;
use std::path::PathBuf;
use vgen_backend::{Backend, VerilogBackend};
use vgen_ir::Netlist;
use vgen_utils::{Error, OutputFile, Result};

/// Emits just the Verilog module: `<outdir>/<name>.v`.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "module")]
struct ModuleCommand {
    /// path to the JSON-encoded netlist
    #[argh(option)]
    netlist: PathBuf,

    /// the module's name, used as its Verilog identifier and output filename
    #[argh(option)]
    name: String,

    /// directory the output is written into; created if missing
    #[argh(option)]
    outdir: PathBuf,
}

/// Emits the Verilog module plus the fixed Verilator harness: `<name>.v`,
/// `<name>.cpp`, `<name>.mk`, and `Makefile`.
#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "top")]
struct TopCommand {
    /// path to the JSON-encoded netlist
    #[argh(option)]
    netlist: PathBuf,

    /// the module's name, used as its Verilog identifier and output filenames
    #[argh(option)]
    name: String,

    /// directory the output is written into; created if missing
    #[argh(option)]
    outdir: PathBuf,

    /// resource path substituted for $(BLARNEY_ROOT) in the generated `.mk`
    #[argh(option, default = "\"$(BLARNEY_ROOT)\".to_string()")]
    blarney_root: String,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum Subcommand {
    Module(ModuleCommand),
    Top(TopCommand),
}

/// Lowers an elaborated hardware netlist to Verilog.
#[derive(FromArgs, PartialEq, Debug)]
struct Opts {
    #[argh(subcommand)]
    cmd: Subcommand,
}

fn load_netlist(path: &PathBuf) -> Result<Netlist> {
    let text = std::fs::read_to_string(path).map_err(Error::from)?;
    let netlist: Netlist = serde_json::from_str(&text)?;
    Ok(netlist)
}

fn run(opts: Opts) -> Result<()> {
    match opts.cmd {
        Subcommand::Module(cmd) => {
            let netlist = load_netlist(&cmd.netlist)?;
            std::fs::create_dir_all(&cmd.outdir).map_err(Error::from)?;
            let backend = VerilogBackend;
            let out = OutputFile::file(cmd.outdir.join(format!("{}.v", cmd.name)));
            backend.run(&netlist, &cmd.name, out)
        }
        Subcommand::Top(cmd) => {
            let netlist = load_netlist(&cmd.netlist)?;
            std::fs::create_dir_all(&cmd.outdir).map_err(Error::from)?;
            let backend = VerilogBackend;
            let out = OutputFile::file(cmd.outdir.join(format!("{}.v", cmd.name)));
            backend.run(&netlist, &cmd.name, out)?;
            vgen_backend::emit_harness(&cmd.outdir, &cmd.name, &cmd.blarney_root)
        }
    }
}

fn main() {
    env_logger::init();
    let opts: Opts = argh::from_env();
    if let Err(e) = run(opts) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
