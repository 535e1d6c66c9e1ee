mod cli;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("jsonschema-gen error: {error:#}");
        std::process::exit(1);
    }
}
