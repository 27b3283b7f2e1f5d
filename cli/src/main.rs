mod commands;
mod terminal;

use commands::{CommandLine, search};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    if commands.version {
        println!("{}", commands::build_id());
        return Ok(());
    }

    logging::init_logging(commands.verbose, commands.quiet);

    print::header("starting search");
    search::search(&commands)
}
