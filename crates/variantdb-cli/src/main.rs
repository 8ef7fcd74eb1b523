use clap::Parser;

mod cli;
mod run;

fn main() {
    let args = cli::VariantDbCli::parse();
    let debug = args.debug;
    if let Err(e) = run::run(args) {
        eprintln!("Stopping with error: {e}");
        if debug {
            eprintln!("Full diagnostics: {e:?}");
        }
        std::process::exit(1);
    }
    std::process::exit(0);
}
