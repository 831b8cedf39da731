pub mod ir;
pub mod lua;
pub mod namespace;
pub mod emit;
pub mod chunk;
pub mod namespace_table;
pub mod dump;
pub mod error;
pub mod input;
pub mod path_de;
pub mod jq_exec;
pub mod cli;
pub mod logging;

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let command_line_interface = cli::CommandLineInterface::load();
    command_line_interface.run()
}
