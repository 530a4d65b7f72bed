use clap::{Arg, ArgAction, ArgMatches, Command, builder::ValueParser, value_parser};
pub use handlers::handle_subcommands;
use std::sync::LazyLock;

mod commands;
mod handlers;

pub static CLAP_ARGS: LazyLock<ArgMatches> = LazyLock::new(get_matches);

pub fn build_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("transcript")
                .help("Chat transcript to open")
                .value_parser(ValueParser::path_buf())
                .value_name("TRANSCRIPT"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file")
                .value_parser(ValueParser::path_buf())
                .value_name("FILE"),
        )
        .arg(
            Arg::new("no_config")
                .long("no-config")
                .help("Ignore configuration file")
                .conflicts_with("config")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("item_height")
                .long("item-height")
                .help("Rows given to every message")
                .value_parser(value_parser!(u16).range(1..))
                .value_name("ROWS"),
        )
        .arg(
            Arg::new("overscan")
                .long("overscan")
                .help("Messages drawn beyond each edge of the screen")
                .value_parser(value_parser!(usize))
                .value_name("COUNT"),
        )
        .subcommand(commands::create_demo_subcommand())
        .subcommand(commands::create_window_subcommand())
}

pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}
